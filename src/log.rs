// src/log.rs
use ::log::LevelFilter;

/// Colored terminal logger. Info by default, Debug with `verbose`.
///
/// Safe to call twice; the second call is a no-op (tests install their own).
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let mut clog = colog::default_builder();
    clog.filter(None, level);
    // quiet the HTTP stack unless asked
    clog.filter(Some("ureq"), if verbose { LevelFilter::Info } else { LevelFilter::Warn });
    clog.filter(Some("rustls"), LevelFilter::Warn);
    let _ = clog.try_init();
}
