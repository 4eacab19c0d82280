pub mod address;
pub mod cell;
pub mod navigation;
pub mod projection;
pub mod seed;
pub mod sheet;
pub mod view_state;
pub mod workspace;
