//! End-to-end checks of the HTTP-backed stages against loopback servers.

#[cfg(test)]
mod collection;
#[cfg(test)]
mod probing;
#[cfg(test)]
mod util;
