pub mod audible_alarm;
pub mod indicator_light;
pub mod matrix_indicator;
pub mod sampler;
pub mod text_display;
