pub mod category;
pub mod educational_roadmap;
pub mod educational_trail;
pub mod health;
pub mod key_result;
pub mod objective;
pub mod roadmap;
pub mod shared;
