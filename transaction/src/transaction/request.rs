// This source is derived from Parity code
//
//! Transaction requests and their builder

use ethereum_types::{Address, U256};

use super::{AccessList, Action, TypedTransaction};
use crate::error::Error;
use crate::field::{AddressField, FieldValue, TransactionField};
use crate::Bytes;

/// Every field any variant carries, all optional.
///
/// Which of them are populated decides the wire variant, see
/// [`super::TxType::select`].
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
	pub chain_id: Option<u64>,
	pub nonce: Option<U256>,
	pub gas_price: Option<U256>,
	pub gas_limit: Option<U256>,
	pub to: Option<AddressField>,
	pub value: Option<U256>,
	pub data: Option<Bytes>,
	pub access_list: Option<AccessList>,
	pub max_fee_per_gas: Option<U256>,
	pub max_priority_fee_per_gas: Option<U256>,
	pub fee_currency: Option<AddressField>,
	pub max_fee_in_fee_currency: Option<U256>,
}

fn is_present(value: &Option<U256>) -> bool {
	value.map_or(false, |v| !v.is_zero())
}

fn address_is_present(value: &Option<AddressField>) -> bool {
	value.as_ref().map_or(false, |a| !a.as_bytes().is_empty())
}

impl TransactionRequest {
	/// Builds a request from loosely typed `(name, value)` pairs.
	pub fn from_fields<I, K>(fields: I) -> Result<Self, Error>
	where
		I: IntoIterator<Item = (K, FieldValue)>,
		K: AsRef<str>,
	{
		let mut request = TransactionRequest::default();
		for (name, value) in fields {
			request.set(name.as_ref(), value)?;
		}
		Ok(request)
	}

	/// Sets the property `name`, formatting `value` the way the field is
	/// encoded. Names outside the allow-list are rejected.
	pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), Error> {
		let field = TransactionField::from_name(name)?;
		if field == TransactionField::AccessList {
			return match value {
				FieldValue::AccessList(list) => {
					self.access_list = Some(list);
					Ok(())
				}
				_ => Err(Error::InvalidFieldValue(field)),
			};
		}

		let raw = value.into_bytes(field)?;
		let formatted = field.format(&raw)?;
		let number = || U256::from_big_endian(&formatted);
		match field {
			TransactionField::ChainId => {
				if formatted.len() > 8 {
					return Err(Error::InvalidChainId);
				}
				self.chain_id = Some(number().low_u64());
			}
			TransactionField::Nonce => self.nonce = Some(number()),
			TransactionField::GasPrice => self.gas_price = Some(number()),
			TransactionField::GasLimit => self.gas_limit = Some(number()),
			TransactionField::Value => self.value = Some(number()),
			TransactionField::MaxFeePerGas => self.max_fee_per_gas = Some(number()),
			TransactionField::MaxPriorityFeePerGas => self.max_priority_fee_per_gas = Some(number()),
			TransactionField::MaxFeeInFeeCurrency => self.max_fee_in_fee_currency = Some(number()),
			TransactionField::To => self.to = AddressField::from_bytes(&formatted),
			TransactionField::FeeCurrency => self.fee_currency = AddressField::from_bytes(&formatted),
			TransactionField::Data => self.data = Some(formatted),
			TransactionField::AccessList => return Err(Error::InvalidFieldValue(field)),
		}
		Ok(())
	}

	pub(crate) fn has_fee_currency(&self) -> bool {
		address_is_present(&self.fee_currency)
	}

	pub(crate) fn has_max_fee_in_fee_currency(&self) -> bool {
		is_present(&self.max_fee_in_fee_currency)
	}

	pub(crate) fn has_fee_market(&self) -> bool {
		is_present(&self.max_fee_per_gas) && is_present(&self.max_priority_fee_per_gas)
	}

	pub(crate) fn has_access_list(&self) -> bool {
		self.access_list.is_some()
	}

	/// Recipient, if it is a well-formed address.
	pub fn to_address(&self) -> Option<Address> {
		self.to.as_ref().and_then(AddressField::address)
	}

	/// Fee currency, if it is a well-formed address.
	pub fn fee_currency_address(&self) -> Option<Address> {
		self.fee_currency.as_ref().and_then(AddressField::address)
	}
}

/// Assembles a [`TransactionRequest`] for a call or contract creation.
pub struct TransactionRequestBuilder {
	request: TransactionRequest,
}

impl TransactionRequestBuilder {
	pub fn new(nonce: U256, gas: U256, action: Action, value: U256, data: Bytes) -> Self {
		let to = match action {
			Action::Create => None,
			Action::Call(address) => Some(AddressField::Address(address)),
		};
		TransactionRequestBuilder {
			request: TransactionRequest {
				nonce: Some(nonce),
				gas_limit: Some(gas),
				to,
				value: Some(value),
				data: Some(data),
				..Default::default()
			},
		}
	}

	pub fn with_chain_id(mut self, chain_id: u64) -> Self {
		self.request.chain_id = Some(chain_id);
		self
	}

	pub fn with_gas_price(mut self, gas_price: U256) -> Self {
		self.request.gas_price = Some(gas_price);
		self
	}

	pub fn with_priority_fee_per_gas(mut self, max_fee_per_gas: U256, max_priority_fee_per_gas: U256) -> Self {
		self.request.max_fee_per_gas = Some(max_fee_per_gas);
		self.request.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
		self
	}

	pub fn with_access_list(mut self, access_list: AccessList) -> Self {
		self.request.access_list = Some(access_list);
		self
	}

	pub fn with_fee_currency(mut self, fee_currency: Address) -> Self {
		self.request.fee_currency = Some(AddressField::Address(fee_currency));
		self
	}

	pub fn with_max_fee_in_fee_currency(mut self, max_fee: U256) -> Self {
		self.request.max_fee_in_fee_currency = Some(max_fee);
		self
	}

	/// The request as assembled so far.
	pub fn request(self) -> TransactionRequest {
		self.request
	}

	/// Classifies the request into its wire variant.
	pub fn build(self) -> Result<TypedTransaction, Error> {
		TypedTransaction::classify(&self.request)
	}
}
