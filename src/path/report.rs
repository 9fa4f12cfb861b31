// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! One-line renderings of a path.
//!
//! Every line has the shape
//!
//! ```text
//! <start>: (<path length>,<multiplier>*2^<factors>): <body>
//! ```
//!
//! with the start right justified to a caller-chosen width so that columns
//! of related paths line up. The body is separated by at least one space and
//! can be indented further to show divergent and convergent flows.

use super::Path;
use crate::arith::CollatzInt;
use std::fmt;

impl<T: CollatzInt> Path<T> {
    fn line(&self, factors: usize, indent: usize, width: usize, body: &str) -> String {
        format!(
            "{:>width$}: ({:02},{}*2^{:03}):{:indent$}{}",
            self.start,
            self.path_length(),
            self.params.multiplier(),
            factors,
            "",
            body,
            width = width,
            indent = indent.max(1),
        )
    }

    /// The first `len` class digits, indented by `indent` spaces.
    ///
    /// ```
    /// use collatz_orbits::{CollatzParams, Path};
    ///
    /// let path = Path::new(7i64, &CollatzParams::default());
    /// assert_eq!(path.report(2, 0, 3), "  7: (05,3*2^002): +11");
    /// ```
    pub fn report(&self, len: usize, indent: usize, width: usize) -> String {
        self.line(len, indent, width, &self.flow(len))
    }

    /// The class truncated to the path factors.
    pub fn report_class(&self, width: usize) -> String {
        let factors = self.path_factors as usize;
        self.line(factors, 0, width, &self.flow(factors))
    }

    /// The orbit legs.
    pub fn report_path(&self, width: usize) -> String {
        self.line(self.path_factors as usize, 0, width, &self.path_string())
    }
}

impl<T: CollatzInt> fmt::Display for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report(self.class_len, 0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollatzParams;

    #[test]
    fn test_report_path() {
        let path = Path::new(79i64, &CollatzParams::default());
        assert_eq!(path.report_path(4), "  79: (06,3*2^008): 0 1 1 1 3 2");
    }

    #[test]
    fn test_report_class() {
        let path = Path::new(13i64, &CollatzParams::default());
        // 13 -> 40 -> 20 -> 10 (stops below 13)
        assert_eq!(path.path_factors(), 2);
        assert_eq!(path.report_class(0), "13: (02,3*2^002): +10");
    }

    #[test]
    fn test_indent() {
        let path = Path::new(-7i64, &CollatzParams::default());
        assert_eq!(path.report(2, 4, 0), "-7: (02,3*2^002):    -11");
        assert_eq!(path.to_string(), "-7: (02,3*2^002): -11");
    }
}
