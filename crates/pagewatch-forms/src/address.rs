use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressListId {
    Recipients,
    Cc,
}

impl AddressListId {
    pub fn placeholder(&self) -> &'static str {
        match self {
            AddressListId::Recipients => "请输入邮件地址...",
            AddressListId::Cc => "请输入抄送地址...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRow {
    id: RowId,
    pub value: String,
}

impl AddressRow {
    pub fn id(&self) -> RowId {
        self.id
    }
}

/// Repeatable address inputs. Rows are addressed by identity, so removing one
/// row never shifts the meaning of another row's handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressList {
    kind: AddressListId,
    rows: Vec<AddressRow>,
    next_id: u64,
}

impl AddressList {
    /// A list showing one blank row, as the page first renders it.
    pub fn new(kind: AddressListId) -> Self {
        let mut list = Self::empty(kind);
        list.add_row();
        list
    }

    pub fn empty(kind: AddressListId) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            next_id: 0,
        }
    }

    pub fn kind(&self) -> AddressListId {
        self.kind
    }

    pub fn placeholder(&self) -> &'static str {
        self.kind.placeholder()
    }

    pub fn add_row(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(AddressRow {
            id,
            value: String::new(),
        });
        id
    }

    pub fn push(&mut self, value: impl Into<String>) -> RowId {
        let id = self.add_row();
        self.set_value(id, value);
        id
    }

    pub fn set_value(&mut self, row: RowId, value: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|candidate| candidate.id == row) {
            Some(candidate) => {
                candidate.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_row(&mut self, row: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|candidate| candidate.id != row);
        self.rows.len() != before
    }

    /// Drop every row and show a single blank one. Row ids keep counting up.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.add_row();
    }

    pub fn rows(&self) -> &[AddressRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Trimmed, non-blank values in row order. Duplicates are kept.
    pub fn collect(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }
}
