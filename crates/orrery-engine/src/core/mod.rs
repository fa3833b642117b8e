pub mod body;
pub mod kinematics;
pub mod rng;
pub mod time;
pub mod tree;
