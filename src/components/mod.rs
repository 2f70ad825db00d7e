pub mod app;
pub mod play_controls;
pub mod seek_bar;
pub mod track_list;
pub mod visualizer;
