// Copyright 2015-2018 Parity Technologies (UK) Ltd.
// This file is part of Parity.

// Parity is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Parity is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Parity.  If not, see <http://www.gnu.org/licenses/>.


//! Mixed-case checksum encoding of addresses (EIP-55).

use rustc_hex::ToHex;
use crate::{Address, Keccak256};

/// Renders `address` as `0x`-prefixed hex with EIP-55 capitalisation.
pub fn to_checksum_address(address: &Address) -> String {
	let lower: String = address.as_bytes().to_hex();
	let hash = lower.as_bytes().keccak256();

	let mut out = String::with_capacity(42);
	out.push_str("0x");
	for (i, c) in lower.chars().enumerate() {
		let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
		if nibble >= 8 {
			out.push(c.to_ascii_uppercase());
		} else {
			out.push(c);
		}
	}
	out
}
