pub mod bubble_map;
pub mod canvas;
pub mod detail_panel;
pub mod turntable;
