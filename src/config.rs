use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

use crate::content::frontmatter::FrontmatterOptions;

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub author: String,
}

#[derive(Deserialize)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct ContentOptions {
    pub fence: Option<String>,
    pub excerpt_marker: Option<String>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub server: Server,
    pub content: Option<ContentOptions>,
    pub log: Option<Log>,
}

impl Config {
    /// Frontmatter markers with the built-in defaults applied once, here,
    /// rather than wherever they happen to be used.
    pub fn frontmatter_options(&self) -> FrontmatterOptions {
        let mut options = FrontmatterOptions::default();
        if let Some(ref content) = self.content {
            if let Some(ref fence) = content.fence {
                options.fence = fence.clone();
            }
            if let Some(ref marker) = content.excerpt_marker {
                options.excerpt_marker = marker.clone();
            }
        }
        options
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => {
            return Err(io::Error::new(
                e.kind(),
                format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e),
            ))
        }
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Error parsing configuration file: {}", e),
            ))
        }
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir),
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
    };

    Ok(cfg)
}
