//! Output generation for the dashboard page.
//!
//! This module contains submodules responsible for turning a
//! [`crate::dashboard::Dashboard`] view model into what the browser receives:
//!
//! # Submodules
//!
//! - [`html`]: The complete HTML page with metrics, tables and keyword listings
//! - [`svg`]: Inline SVG images for the monthly line chart, the domain bar
//!   chart and the word cloud
//!
//! # Page Structure
//!
//! ```text
//! <h1> title
//! ├── Statistik Umum          metrics + collapsible article table
//! ├── Artikel per Bulan       line chart | info message
//! ├── 5 Domain ...            bar chart
//! ├── Word Cloud ...          word cloud | info message
//! ├── Cari Artikel ...        search form + results (collapsed when idle)
//! └── Artikel tentang ...     fixed "stroke" listing | info message
//! ```

pub mod html;
pub mod svg;
