pub mod config_hot_reload;
