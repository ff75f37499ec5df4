mod cache;
mod standings;
