mod app;
mod dom;
mod engine;
mod ext;
mod locate;
mod persistence;
mod render;
mod state;
mod surface;
mod toolbar;
mod util;

pub use app::run;
