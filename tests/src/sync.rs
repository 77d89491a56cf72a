mod file_sources;
mod passes;
