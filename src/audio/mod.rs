pub mod analyser;
pub mod fetch;
pub mod player;
pub mod session;
