//! About command: print the documentation index

use neolink_core::about::render_index;

pub fn run() {
    print!("{}", render_index());
}
