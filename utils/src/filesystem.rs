/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of motor-sim.
 *
 * motor-sim is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * motor-sim is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with motor-sim. If not, see <https://www.gnu.org/licenses/>.
 */

use std::{fs, io};
use std::path::{Path, PathBuf};

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Takes a name and turns it into a safe filename in the provided path. The filename
/// will be "safe" in the sense that it will be free of any characters that would be
/// illegal to use in a filesystem path. Additionally, any spaces in the filename will
/// be replaced with underscores.
///
/// The same name always maps to the same path so re-running overwrites the
/// previous output
pub fn safe_filename_in_path(path: &Path, name: &str, extension: &str) -> PathBuf {
    let mut sanitized_name = sanitize_filename::sanitize(name);
    sanitized_name = sanitized_name.replace(" ", "_");
    if sanitized_name.is_empty() {
        sanitized_name = String::from("unnamed");
    }
    path.join(format!("{}.{}", sanitized_name, extension))
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use crate::filesystem::safe_filename_in_path;

    #[test]
    fn safe_filename_tests() {
        let dir = Path::new("Graphs");
        assert_eq!(safe_filename_in_path(dir, "EMRAX 208", "png"), dir.join("EMRAX_208.png"));
        assert_eq!(safe_filename_in_path(dir, "a/b:c", "png"), dir.join("abc.png"));
        assert_eq!(safe_filename_in_path(dir, "///", "png"), dir.join("unnamed.png"));
    }
}
