use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads a whole text file.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Lists all files with a given extension in a directory.
///
/// Returns sorted file names only (no paths). Subdirectories are ignored.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let paths = fs::read_dir(dir)?
		.map(|entry| entry.map(|e| e.path()))
		.collect::<io::Result<Vec<PathBuf>>>()?;

	let mut names: Vec<String> = paths
		.iter()
		.filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == extension))
		.filter_map(|path| path.file_name())
		.map(|name| name.to_string_lossy().into_owned())
		.collect();
	names.sort_unstable();
	Ok(names)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_list_and_read() {
		let dir = std::env::temp_dir().join(format!("ppm-core-io-{}", std::process::id()));
		fs::create_dir_all(dir.join("nested.txt")).unwrap();
		fs::write(dir.join("b.txt"), "bee").unwrap();
		fs::write(dir.join("a.txt"), "ay").unwrap();
		fs::write(dir.join("c.md"), "sea").unwrap();

		assert_eq!(list_files(&dir, "txt").unwrap(), vec!["a.txt", "b.txt"]);
		assert_eq!(read_file(dir.join("b.txt")).unwrap(), "bee");
		assert!(read_file(dir.join("missing.txt")).is_err());

		fs::remove_dir_all(&dir).unwrap();
		assert!(list_files(&dir, "txt").is_err());
	}
}
