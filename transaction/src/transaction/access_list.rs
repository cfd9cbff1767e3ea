// This source is derived from Parity code
//
//! EIP-2930 access lists, carried by every typed Celo transaction.

use ethereum_types::{Address, H256};
use rlp::{self, DecoderError, Rlp, RlpStream};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListItem {
	/// Account addresses that would be loaded at the start of execution
	pub address: Address,
	/// Keys of storage that would be loaded at the start of execution
	pub storage_keys: Vec<H256>,
}

impl rlp::Decodable for AccessListItem {
	fn decode(d: &Rlp) -> Result<Self, DecoderError> {
		if d.item_count()? != 2 {
			return Err(DecoderError::RlpIncorrectListLen);
		}
		let address = d.val_at(0)?;
		let keys_rlp = d.at(1)?;
		if !keys_rlp.is_list() {
			return Err(DecoderError::RlpExpectedToBeList);
		}
		let mut storage_keys: Vec<H256> = Vec::with_capacity(keys_rlp.item_count()?);
		for i in 0..keys_rlp.item_count()? {
			storage_keys.push(keys_rlp.val_at(i)?);
		}
		Ok(AccessListItem { address, storage_keys })
	}
}

impl rlp::Encodable for AccessListItem {
	fn rlp_append(&self, s: &mut RlpStream) {
		s.begin_list(2);
		s.append(&self.address);

		s.begin_list(self.storage_keys.len());
		for key in self.storage_keys.iter() {
			s.append(key);
		}
	}
}

/// AccessList as defined in EIP-2930
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessList {
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}
}

impl From<Vec<AccessListItem>> for AccessList {
	fn from(items: Vec<AccessListItem>) -> Self {
		AccessList(items)
	}
}

impl rlp::Decodable for AccessList {
	fn decode(d: &Rlp) -> Result<Self, DecoderError> {
		if !d.is_list() {
			return Err(DecoderError::RlpExpectedToBeList);
		}
		let mut items: Vec<AccessListItem> = Vec::with_capacity(d.item_count()?);
		for i in 0..d.item_count()? {
			items.push(d.val_at(i)?);
		}
		Ok(AccessList(items))
	}
}

impl rlp::Encodable for AccessList {
	fn rlp_append(&self, s: &mut RlpStream) {
		s.begin_list(self.0.len());
		for item in self.0.iter() {
			s.append(item);
		}
	}
}
