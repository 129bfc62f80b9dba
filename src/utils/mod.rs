pub mod layout;
pub mod path;
pub mod text_input;
pub mod validation;

pub use layout::{center_area, create_standard_layout};
pub use path::{expand_path, get_config_dir, get_config_path, get_home_dir, get_session_path};
pub use text_input::TextInput;
