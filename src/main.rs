//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use prereq_graph::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
