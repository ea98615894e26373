pub mod category;
pub mod educational_resource;
pub mod educational_roadmap;
pub mod educational_trail;
pub mod key_result;
pub mod objective;
pub mod roadmap;
pub mod roadmap_category;
pub mod roadmap_item;
pub mod trail_activity;
pub mod trail_resource;
pub mod trail_step;
