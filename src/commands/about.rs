/// Print name, version, description, and license information.
pub fn run() {
	println!(
		"\n{} {}, {}, {}\n",
		env!("CARGO_PKG_NAME"),
		env!("CARGO_PKG_VERSION"),
		env!("CARGO_PKG_DESCRIPTION"),
		env!("CARGO_PKG_LICENSE")
	);
}
