//! Browser entry point.

use leptos::prelude::*;
use replay_map::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
