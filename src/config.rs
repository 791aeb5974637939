/*
 *  config.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  YAML configuration layered under command line overrides
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::clock::ClockMetadata;
use crate::constants::{DEFAULT_BOUNDS_OFFSET, DEFAULT_ICON_SIZE};
use crate::icon::IconMask;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub icon: Option<IconConfig>,
    pub clock: Option<ClockConfig>,
    pub demo: Option<DemoConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IconConfig {
    pub size: Option<u32>,             // edge in pixels
    pub bounds_offset: Option<f32>,    // fraction trimmed per edge, [0, 0.5)
    pub mask: Option<IconMask>,
    pub ascii: Option<bool>,           // print frames to stdout
}

/// Clock metadata as an icon pack would publish it, plus the seconds switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClockConfig {
    pub hour_layer_index: Option<i32>,
    pub minute_layer_index: Option<i32>,
    pub second_layer_index: Option<i32>,
    pub default_hour: Option<i32>,
    pub default_minute: Option<i32>,
    pub default_second: Option<i32>,
    pub seconds_hand: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DemoConfig {
    pub instances: Option<u32>,
    pub run_secs: Option<u64>,         // 0 runs until interrupted
    pub themed: Option<bool>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "dynaclock", about = "Live analog clock icons", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub icon_size: Option<u32>,
    #[arg(long)]
    pub bounds_offset: Option<f32>,
    /// circle | rounded | square
    #[arg(long, value_parser = parse_mask)]
    pub mask: Option<IconMask>,
    #[arg(long, action = ArgAction::Set)]
    pub ascii: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub seconds_hand: Option<bool>,
    #[arg(long)]
    pub instances: Option<u32>,
    #[arg(long)]
    pub run_secs: Option<u64>,
    #[arg(long, action = ArgAction::Set)]
    pub themed: Option<bool>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

fn parse_mask(s: &str) -> Result<IconMask, String> {
    match s.to_ascii_lowercase().as_str() {
        "circle" => Ok(IconMask::Circle),
        "rounded" => Ok(IconMask::Rounded),
        "square" => Ok(IconMask::Square),
        other => Err(format!("unknown mask '{other}', expected circle|rounded|square")),
    }
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn icon_size(&self) -> u32 {
        self.icon.as_ref().and_then(|i| i.size).unwrap_or(DEFAULT_ICON_SIZE)
    }

    pub fn bounds_offset(&self) -> f32 {
        self.icon.as_ref().and_then(|i| i.bounds_offset).unwrap_or(DEFAULT_BOUNDS_OFFSET)
    }

    pub fn mask(&self) -> Option<IconMask> {
        self.icon.as_ref().and_then(|i| i.mask)
    }

    pub fn ascii(&self) -> bool {
        self.icon.as_ref().and_then(|i| i.ascii).unwrap_or(false)
    }

    pub fn seconds_hand(&self) -> bool {
        self.clock.as_ref().and_then(|c| c.seconds_hand).unwrap_or(false)
    }

    /// Configured clock metadata, unset fields taken from `base`
    pub fn clock_metadata(&self, base: ClockMetadata) -> ClockMetadata {
        let Some(c) = self.clock.as_ref() else {
            return base;
        };
        ClockMetadata {
            hour_layer_index: c.hour_layer_index.unwrap_or(base.hour_layer_index),
            minute_layer_index: c.minute_layer_index.unwrap_or(base.minute_layer_index),
            second_layer_index: c.second_layer_index.unwrap_or(base.second_layer_index),
            default_hour: c.default_hour.unwrap_or(base.default_hour),
            default_minute: c.default_minute.unwrap_or(base.default_minute),
            default_second: c.default_second.unwrap_or(base.default_second),
        }
    }

    pub fn instances(&self) -> u32 {
        self.demo.as_ref().and_then(|d| d.instances).unwrap_or(1)
    }

    pub fn run_secs(&self) -> u64 {
        self.demo.as_ref().and_then(|d| d.run_secs).unwrap_or(0)
    }

    pub fn themed(&self) -> bool {
        self.demo.as_ref().and_then(|d| d.themed).unwrap_or(false)
    }
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Build the effective config for already-parsed CLI arguments.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/dynaclock/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/dynaclock/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/dynaclock.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["dynaclock.yaml", "config.yaml", "config/dynaclock.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    match (&mut dst.icon, src.icon) {
        (None, Some(c)) => dst.icon = Some(c),
        (Some(d), Some(s)) => merge_icon(d, s),
        _ => {}
    }
    match (&mut dst.clock, src.clock) {
        (None, Some(c)) => dst.clock = Some(c),
        (Some(d), Some(s)) => merge_clock(d, s),
        _ => {}
    }
    match (&mut dst.demo, src.demo) {
        (None, Some(c)) => dst.demo = Some(c),
        (Some(d), Some(s)) => merge_demo(d, s),
        _ => {}
    }
}

fn merge_icon(dst: &mut IconConfig, src: IconConfig) {
    if src.size.is_some()           { dst.size = src.size; }
    if src.bounds_offset.is_some()  { dst.bounds_offset = src.bounds_offset; }
    if src.mask.is_some()           { dst.mask = src.mask; }
    if src.ascii.is_some()          { dst.ascii = src.ascii; }
}

fn merge_clock(dst: &mut ClockConfig, src: ClockConfig) {
    if src.hour_layer_index.is_some()   { dst.hour_layer_index = src.hour_layer_index; }
    if src.minute_layer_index.is_some() { dst.minute_layer_index = src.minute_layer_index; }
    if src.second_layer_index.is_some() { dst.second_layer_index = src.second_layer_index; }
    if src.default_hour.is_some()       { dst.default_hour = src.default_hour; }
    if src.default_minute.is_some()     { dst.default_minute = src.default_minute; }
    if src.default_second.is_some()     { dst.default_second = src.default_second; }
    if src.seconds_hand.is_some()       { dst.seconds_hand = src.seconds_hand; }
}

fn merge_demo(dst: &mut DemoConfig, src: DemoConfig) {
    if src.instances.is_some()  { dst.instances = src.instances; }
    if src.run_secs.is_some()   { dst.run_secs = src.run_secs; }
    if src.themed.is_some()     { dst.themed = src.themed; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()       { cfg.log_level = cli.log_level.clone(); }

    let any_icon = cli.icon_size.is_some()
        || cli.bounds_offset.is_some()
        || cli.mask.is_some()
        || cli.ascii.is_some();
    if any_icon && cfg.icon.is_none() {
        cfg.icon = Some(IconConfig::default());
    }
    if let Some(icon) = cfg.icon.as_mut() {
        if cli.icon_size.is_some()      { icon.size = cli.icon_size; }
        if cli.bounds_offset.is_some()  { icon.bounds_offset = cli.bounds_offset; }
        if cli.mask.is_some()           { icon.mask = cli.mask; }
        if cli.ascii.is_some()          { icon.ascii = cli.ascii; }
    }

    if cli.seconds_hand.is_some() {
        cfg.clock.get_or_insert_with(ClockConfig::default).seconds_hand = cli.seconds_hand;
    }

    let any_demo = cli.instances.is_some() || cli.run_secs.is_some() || cli.themed.is_some();
    if any_demo && cfg.demo.is_none() {
        cfg.demo = Some(DemoConfig::default());
    }
    if let Some(demo) = cfg.demo.as_mut() {
        if cli.instances.is_some()  { demo.instances = cli.instances; }
        if cli.run_secs.is_some()   { demo.run_secs = cli.run_secs; }
        if cli.themed.is_some()     { demo.themed = cli.themed; }
    }
}

fn check_range(name: &str, value: Option<i32>, max: i32) -> Result<(), ConfigError> {
    match value {
        Some(v) if !(0..max).contains(&v) => Err(ConfigError::Validation(format!(
            "clock {name} must be 0..{max}, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Ranges and required relations between fields
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        match level.to_ascii_lowercase().as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ConfigError::Validation(format!("unknown log_level '{level}'"))),
        }
    }
    if let Some(icon) = cfg.icon.as_ref() {
        if let Some(size) = icon.size {
            if size == 0 || size > 1024 {
                return Err(ConfigError::Validation("icon size must be 1..=1024".into()));
            }
        }
        if let Some(off) = icon.bounds_offset {
            if !(0.0..0.5).contains(&off) {
                return Err(ConfigError::Validation("icon bounds_offset must be in [0, 0.5)".into()));
            }
        }
    }
    if let Some(clock) = cfg.clock.as_ref() {
        for (name, index) in [
            ("hour_layer_index", clock.hour_layer_index),
            ("minute_layer_index", clock.minute_layer_index),
            ("second_layer_index", clock.second_layer_index),
        ] {
            if matches!(index, Some(i) if i < -1) {
                return Err(ConfigError::Validation(format!("clock {name} must be >= -1")));
            }
        }
        check_range("default_hour", clock.default_hour, 12)?;
        check_range("default_minute", clock.default_minute, 60)?;
        check_range("default_second", clock.default_second, 60)?;
    }
    if let Some(demo) = cfg.demo.as_ref() {
        if demo.instances == Some(0) {
            return Err(ConfigError::Validation("demo instances must be > 0".into()));
        }
    }
    Ok(())
}
