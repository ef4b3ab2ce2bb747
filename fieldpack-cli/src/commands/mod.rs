pub mod calcsize;
pub mod inspect;
pub mod iter;
pub mod pack;
pub mod unpack;
pub mod values;
