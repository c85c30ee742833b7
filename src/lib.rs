//! Xdgbase - XDG Base Directory resolution and layered file lookup.
//!
//! This crate resolves the XDG base directories from the environment, opens the first matching
//! file across the layered configuration and data directories, and wraps the `xdg-settings`
//! command-line tool.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base_dirs;
pub mod os;
#[cfg(feature = "settings")]
#[cfg_attr(docsrs, doc(cfg(feature = "settings")))]
pub mod settings;

pub use base_dirs::xdg::BaseDirectories;
