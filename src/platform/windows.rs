// Linkshelf platform paths for Windows
// Config and data both live in %APPDATA%/Linkshelf

use std::env;
use std::path::PathBuf;

use super::APP_DIR_TITLE;

fn appdata_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join(APP_DIR_TITLE)
}

pub fn get_config_dir() -> PathBuf {
    appdata_dir()
}

pub fn get_data_dir() -> PathBuf {
    appdata_dir()
}
