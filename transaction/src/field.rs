// This source is derived from Parity code
//
//! Field allow-list and canonical byte formatting.

use std::fmt;
use std::str::FromStr;

use ethereum_types::{Address, U256};
use ethkey::to_checksum_address;
use rustc_hex::{FromHex, FromHexError, ToHex};

use crate::error::Error;
use crate::transaction::AccessList;
use crate::Bytes;

/// Maximum encoded size of amounts, gas values and counters.
pub const MAX_NUMERIC_LENGTH: usize = 32;
/// Size of an address.
pub const ADDRESS_LENGTH: usize = 20;

/// How a field is rendered before it enters an RLP structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	/// Minimal big-endian integer, capped at `max_length` bytes.
	Numeric { max_length: usize },
	/// Exactly `length` bytes, or empty.
	Fixed { length: usize },
	/// Passed through untouched.
	Opaque,
	/// Nested `[[address, [key...]]...]` list.
	AccessList,
}

/// Property names a transaction request may carry.
///
/// The deprecated `gatewayFee` and `gatewayFeeRecipient` properties are no
/// longer part of any wire format and are rejected like any unknown name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionField {
	ChainId,
	Nonce,
	GasPrice,
	GasLimit,
	To,
	Value,
	Data,
	AccessList,
	MaxFeePerGas,
	MaxPriorityFeePerGas,
	FeeCurrency,
	MaxFeeInFeeCurrency,
}

impl TransactionField {
	pub const ALL: [TransactionField; 12] = [
		TransactionField::ChainId,
		TransactionField::Nonce,
		TransactionField::GasPrice,
		TransactionField::GasLimit,
		TransactionField::To,
		TransactionField::Value,
		TransactionField::Data,
		TransactionField::AccessList,
		TransactionField::MaxFeePerGas,
		TransactionField::MaxPriorityFeePerGas,
		TransactionField::FeeCurrency,
		TransactionField::MaxFeeInFeeCurrency,
	];

	/// JSON-RPC style property name.
	pub fn name(&self) -> &'static str {
		match *self {
			TransactionField::ChainId => "chainId",
			TransactionField::Nonce => "nonce",
			TransactionField::GasPrice => "gasPrice",
			TransactionField::GasLimit => "gasLimit",
			TransactionField::To => "to",
			TransactionField::Value => "value",
			TransactionField::Data => "data",
			TransactionField::AccessList => "accessList",
			TransactionField::MaxFeePerGas => "maxFeePerGas",
			TransactionField::MaxPriorityFeePerGas => "maxPriorityFeePerGas",
			TransactionField::FeeCurrency => "feeCurrency",
			TransactionField::MaxFeeInFeeCurrency => "maxFeeInFeeCurrency",
		}
	}

	/// Looks a property name up in the allow-list.
	pub fn from_name(name: &str) -> Result<Self, Error> {
		TransactionField::ALL
			.iter()
			.find(|field| field.name() == name)
			.cloned()
			.ok_or_else(|| Error::UnknownProperty(name.to_owned()))
	}

	pub fn kind(&self) -> FieldKind {
		match *self {
			TransactionField::To | TransactionField::FeeCurrency => FieldKind::Fixed { length: ADDRESS_LENGTH },
			TransactionField::Data => FieldKind::Opaque,
			TransactionField::AccessList => FieldKind::AccessList,
			_ => FieldKind::Numeric { max_length: MAX_NUMERIC_LENGTH },
		}
	}

	/// Renders `raw` in the canonical form this field takes on the wire.
	///
	/// Numbers lose their leading zero bytes (zero becomes the empty string),
	/// addresses must be empty or exactly 20 bytes, opaque data is copied.
	pub fn format(&self, raw: &[u8]) -> Result<Bytes, Error> {
		match self.kind() {
			FieldKind::Fixed { length } => {
				if !raw.is_empty() && raw.len() != length {
					return Err(Error::InvalidFieldLength { field: *self, expected: length, found: raw.len() });
				}
				Ok(raw.to_vec())
			}
			FieldKind::Numeric { max_length } => {
				let stripped = strip_zeros(raw);
				if stripped.len() > max_length {
					return Err(Error::FieldTooLong { field: *self, max: max_length, found: stripped.len() });
				}
				Ok(stripped.to_vec())
			}
			FieldKind::Opaque => Ok(raw.to_vec()),
			FieldKind::AccessList => Err(Error::InvalidFieldValue(*self)),
		}
	}
}

impl fmt::Display for TransactionField {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for TransactionField {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		TransactionField::from_name(s)
	}
}

/// Drops leading zero bytes.
pub fn strip_zeros(bytes: &[u8]) -> &[u8] {
	let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
	&bytes[start..]
}

/// Loosely typed input for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
	Number(U256),
	Bytes(Bytes),
	AccessList(AccessList),
}

impl FieldValue {
	/// Parses a `0x`-prefixed (or bare) hex string. Odd lengths are left-padded,
	/// so `"0x0"` reads as a single zero byte.
	pub fn from_hex(s: &str) -> Result<Self, FromHexError> {
		let digits = s.trim_start_matches("0x");
		let bytes: Vec<u8> = if digits.len() % 2 == 1 {
			format!("0{}", digits).from_hex()?
		} else {
			digits.from_hex()?
		};
		Ok(FieldValue::Bytes(bytes))
	}

	/// Raw bytes ahead of formatting. Numbers are rendered 32 bytes wide.
	pub(crate) fn into_bytes(self, field: TransactionField) -> Result<Bytes, Error> {
		match self {
			FieldValue::Number(n) => {
				let mut buf = vec![0u8; 32];
				n.to_big_endian(&mut buf);
				Ok(buf)
			}
			FieldValue::Bytes(bytes) => Ok(bytes),
			FieldValue::AccessList(_) => Err(Error::InvalidFieldValue(field)),
		}
	}
}

impl From<u64> for FieldValue {
	fn from(n: u64) -> Self {
		FieldValue::Number(n.into())
	}
}

impl From<U256> for FieldValue {
	fn from(n: U256) -> Self {
		FieldValue::Number(n)
	}
}

impl From<Bytes> for FieldValue {
	fn from(bytes: Bytes) -> Self {
		FieldValue::Bytes(bytes)
	}
}

impl<'a> From<&'a [u8]> for FieldValue {
	fn from(bytes: &'a [u8]) -> Self {
		FieldValue::Bytes(bytes.to_vec())
	}
}

impl From<Address> for FieldValue {
	fn from(address: Address) -> Self {
		FieldValue::Bytes(address.as_bytes().to_vec())
	}
}

impl From<AccessList> for FieldValue {
	fn from(list: AccessList) -> Self {
		FieldValue::AccessList(list)
	}
}

/// Address-shaped value as found on the wire.
///
/// Parsing keeps bytes that are not 20 long as `Raw` instead of failing;
/// serializing a `Raw` value is a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressField {
	Address(Address),
	Raw(Bytes),
}

impl AddressField {
	/// `None` for empty input.
	pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
		match bytes.len() {
			0 => None,
			ADDRESS_LENGTH => Some(AddressField::Address(Address::from_slice(bytes))),
			_ => Some(AddressField::Raw(bytes.to_vec())),
		}
	}

	pub fn as_bytes(&self) -> &[u8] {
		match *self {
			AddressField::Address(ref address) => address.as_bytes(),
			AddressField::Raw(ref bytes) => bytes,
		}
	}

	pub fn address(&self) -> Option<Address> {
		match *self {
			AddressField::Address(address) => Some(address),
			AddressField::Raw(_) => None,
		}
	}

	/// EIP-55 form for well-formed addresses, plain hex otherwise.
	pub fn to_checksum(&self) -> String {
		match *self {
			AddressField::Address(ref address) => to_checksum_address(address),
			AddressField::Raw(ref bytes) => format!("0x{}", bytes.to_hex::<String>()),
		}
	}

	/// Runs the formatter for `field` and yields the address it holds.
	pub(crate) fn validate(&self, field: TransactionField) -> Result<Option<Address>, Error> {
		let formatted = field.format(self.as_bytes())?;
		if formatted.is_empty() {
			Ok(None)
		} else {
			Ok(Some(Address::from_slice(&formatted)))
		}
	}
}

impl From<Address> for AddressField {
	fn from(address: Address) -> Self {
		AddressField::Address(address)
	}
}

impl fmt::Display for AddressField {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.to_checksum())
	}
}

/// Formats an optional address field, mapping absence to `None`.
pub(crate) fn validate_address(
	field: TransactionField,
	value: &Option<AddressField>,
) -> Result<Option<Address>, Error> {
	match *value {
		Some(ref address) => address.validate(field),
		None => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn allow_list() {
		for field in TransactionField::ALL.iter() {
			assert_eq!(TransactionField::from_name(field.name()), Ok(*field));
		}
		assert_eq!(
			TransactionField::from_name("gatewayFee"),
			Err(Error::UnknownProperty("gatewayFee".into()))
		);
		assert!("gatewayFeeRecipient".parse::<TransactionField>().is_err());
		assert!("from".parse::<TransactionField>().is_err());
	}

	#[test]
	fn numbers_are_minimal_big_endian() {
		let field = TransactionField::Nonce;
		assert_eq!(field.format(&[0, 0, 1, 0]).unwrap(), vec![1, 0]);
		assert_eq!(field.format(&[0, 0, 0]).unwrap(), Vec::<u8>::new());
		assert_eq!(field.format(&[]).unwrap(), Vec::<u8>::new());
		let wide = FieldValue::from(42_220u64).into_bytes(field).unwrap();
		assert_eq!(wide.len(), 32);
		assert_eq!(field.format(&wide).unwrap(), vec![0xa4, 0xec]);
		let zero = FieldValue::Number(U256::zero()).into_bytes(field).unwrap();
		assert!(field.format(&zero).unwrap().is_empty());
	}

	#[test]
	fn numbers_over_32_bytes_are_rejected() {
		let mut raw = vec![0u8; 40];
		raw[6] = 1;
		assert_eq!(
			TransactionField::Value.format(&raw),
			Err(Error::FieldTooLong { field: TransactionField::Value, max: 32, found: 34 })
		);

		// leading zeros don't count towards the limit
		let mut padded = vec![0u8; 40];
		padded[39] = 1;
		assert_eq!(TransactionField::Value.format(&padded).unwrap(), vec![1]);
	}

	#[test]
	fn addresses_are_exactly_20_bytes_or_empty() {
		let field = TransactionField::To;
		assert_eq!(field.format(&[0x11; 20]).unwrap(), vec![0x11; 20]);
		assert!(field.format(&[]).unwrap().is_empty());
		assert_eq!(
			field.format(&[0x11; 19]),
			Err(Error::InvalidFieldLength { field: TransactionField::To, expected: 20, found: 19 })
		);
		assert!(TransactionField::FeeCurrency.format(&[0x11; 21]).unwrap_err().is_validation());
	}

	#[test]
	fn data_is_passed_through() {
		let data = vec![0, 0, 0xde, 0xad];
		assert_eq!(TransactionField::Data.format(&data).unwrap(), data);
	}

	#[test]
	fn hex_values() {
		assert_eq!(FieldValue::from_hex("0x0").unwrap(), FieldValue::Bytes(vec![0]));
		assert_eq!(FieldValue::from_hex("0x").unwrap(), FieldValue::Bytes(vec![]));
		assert_eq!(FieldValue::from_hex("a4ec").unwrap(), FieldValue::Bytes(vec![0xa4, 0xec]));
		assert!(FieldValue::from_hex("0xzz").is_err());
	}

	#[test]
	fn lenient_addresses() {
		assert_eq!(AddressField::from_bytes(&[]), None);
		assert_eq!(
			AddressField::from_bytes(&[0x22; 20]),
			Some(AddressField::Address(Address::repeat_byte(0x22)))
		);
		let raw = AddressField::from_bytes(&[0x22; 3]).unwrap();
		assert_eq!(raw.to_checksum(), "0x222222");
		assert!(raw.validate(TransactionField::To).is_err());
	}
}
