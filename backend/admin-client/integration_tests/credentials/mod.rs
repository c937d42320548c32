mod file;
mod paths;
