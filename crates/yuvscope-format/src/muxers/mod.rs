//! 输出格式: PPM/PGM 图像与原始平面 dump.

pub mod ppm;
pub mod raw;

pub use ppm::{save_pgm, save_ppm, write_pgm, write_ppm, write_ppm_pixels};
pub use raw::{raw_plane_file_name, save_raw_planes, write_frame};
