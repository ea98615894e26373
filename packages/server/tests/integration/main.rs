mod common;
mod objective;
mod roadmap;
