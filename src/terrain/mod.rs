// 地形：噪声、地形类别、采样点场、平滑模式高度格

pub mod field;
pub mod kind;
pub mod noise;
pub mod smooth;

pub use field::*;
pub use kind::*;
pub use noise::*;
pub use smooth::*;
