pub mod config;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod pose;
pub mod retarget;
pub mod stroke;
