pub mod device;
pub mod entity;
pub mod federation;
pub mod gateway;
pub mod network;
pub mod serdes;
