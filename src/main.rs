/*
 *  main.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Demo host: a handful of live clock icons on a timer loop
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

use std::rc::Rc;
use std::time::Duration;

use env_logger::Env;
use log::{info, warn};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use dynaclock::clock::{ClockDrawableWrapper, ClockOptions};
use dynaclock::config;
use dynaclock::host::{LoopHandle, TickLoop};
use dynaclock::icon::IconSource;
use dynaclock::sample;
use dynaclock::time_source::{SystemClock, TimeSource};

const BUILD_DATE: &str = env!("DYNACLOCK_BUILD_DATE");

#[cfg(unix)]
async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Shutting down.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Shutting down.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> anyhow::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Shutting down.");
    Ok(())
}

// renderers are Rc-based, everything stays on one thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_millis()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let time = Rc::new(SystemClock::new());
    let meta = cfg.clock_metadata(sample::clock_metadata());
    let options = ClockOptions { seconds_hand: cfg.seconds_hand() };

    let wrapper = match ClockDrawableWrapper::for_meta(&meta, options, time.as_ref(), || {
        match (sample::clock_icon(), cfg.mask()) {
            (IconSource::Adaptive(mut icon), Some(mask)) => {
                icon.mask = mask;
                IconSource::Adaptive(icon)
            }
            (source, _) => source,
        }
    }) {
        Ok(w) => w,
        Err(e) => {
            warn!("Clock icon unavailable, showing the static icon instead: {}", e);
            return Ok(());
        }
    };

    info!(
        "Levels at start {:?}, ticking every {}ms",
        wrapper.animation().levels(&time.local_time()),
        wrapper.cadence().tick_ms()
    );
    if let Some(mono) = wrapper.monochrome(time.as_ref()) {
        info!("Monochrome layers available ({} slots)", mono.len());
    }

    let mut state = wrapper.constant_state(cfg.bounds_offset())?;
    if cfg.themed() {
        let (bg, fg) = sample::theme();
        state = state.themed(bg, fg);
    }

    let mut tick_loop = TickLoop::new(LoopHandle::new(), time.clone(), cfg.icon_size())
        .with_ascii(cfg.ascii());
    let first = state.new_drawable(tick_loop.host(), tick_loop.time());
    info!("Icon color {:?}, themed {}", first.icon_color(), first.is_themed());
    for _ in 1..cfg.instances() {
        tick_loop.insert(first.new_instance());
    }
    tick_loop.insert(first);

    let run_for = match cfg.run_secs() {
        0 => Duration::MAX,
        secs => Duration::from_secs(secs),
    };

    tokio::select! {
        res = signal_handler() => {
            res?;
        }
        _ = tick_loop.run_for(run_for) => {
            info!("Run time elapsed.");
        }
    }

    info!("Stopping {} clock renderers.", tick_loop.len());
    Ok(())
}
