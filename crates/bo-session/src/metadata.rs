//! Business-object metadata: field definitions, semantic types, contexts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default row ID field name.
pub const DEFAULT_ROW_ID_NAME: &str = "row_id";

/// Row ID sentinel marking an as-yet-unsaved (create) draft.
pub const DEFAULT_ROW_ID: &str = "0";

/// Fixed timestamp field names maintained by the platform.
const TIMESTAMP_FIELDS: [&str; 4] = ["created_by", "created_dt", "updated_by", "updated_dt"];

/// Server-side operational mode a request is made in, affecting validation
/// and defaults applied server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum Context {
    None,
    Search,
    List,
    Create,
    Copy,
    Update,
    Delete,
    Graph,
    Crosstab,
    PrintTemplate,
    UpdateAll,
    RefSelect,
    DatamapSelect,
    PreValidate,
    PostValidate,
    StateTransition,
    Export,
    Import,
    Associate,
    PanelList,
}

impl From<Context> for u8 {
    fn from(ctx: Context) -> u8 {
        match ctx {
            Context::None => 0,
            Context::Search => 1,
            Context::List => 2,
            Context::Create => 3,
            Context::Copy => 4,
            Context::Update => 5,
            Context::Delete => 6,
            Context::Graph => 7,
            Context::Crosstab => 8,
            Context::PrintTemplate => 9,
            Context::UpdateAll => 10,
            Context::RefSelect => 11,
            Context::DatamapSelect => 12,
            Context::PreValidate => 13,
            Context::PostValidate => 14,
            Context::StateTransition => 15,
            Context::Export => 16,
            Context::Import => 17,
            Context::Associate => 18,
            Context::PanelList => 19,
        }
    }
}

impl From<u8> for Context {
    fn from(code: u8) -> Self {
        match code {
            1 => Context::Search,
            2 => Context::List,
            3 => Context::Create,
            4 => Context::Copy,
            5 => Context::Update,
            6 => Context::Delete,
            7 => Context::Graph,
            8 => Context::Crosstab,
            9 => Context::PrintTemplate,
            10 => Context::UpdateAll,
            11 => Context::RefSelect,
            12 => Context::DatamapSelect,
            13 => Context::PreValidate,
            14 => Context::PostValidate,
            15 => Context::StateTransition,
            16 => Context::Export,
            17 => Context::Import,
            18 => Context::Associate,
            19 => Context::PanelList,
            _ => Context::None,
        }
    }
}

impl Context {
    /// Numeric wire code.
    pub fn code(self) -> u8 {
        self.into()
    }
}

/// Semantic type of a business-object field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum FieldType {
    /// Foreign key (reference to another record).
    Reference,
    Integer,
    Decimal,
    String,
    Date,
    Datetime,
    Time,
    Enum,
    Boolean,
    Password,
    Url,
    Html,
    Email,
    LongString,
    MultiEnum,
    Regexp,
    Document,
    Image,
    Notepad,
    Phone,
    Color,
    Object,
    Geocoordinates,
    /// Codes this client does not classify (including deprecated ones).
    Unknown(u8),
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::String
    }
}

impl From<FieldType> for u8 {
    fn from(ft: FieldType) -> u8 {
        match ft {
            FieldType::Reference => 0,
            FieldType::Integer => 1,
            FieldType::Decimal => 2,
            FieldType::String => 3,
            FieldType::Date => 4,
            FieldType::Datetime => 5,
            FieldType::Time => 6,
            FieldType::Enum => 7,
            FieldType::Boolean => 8,
            FieldType::Password => 9,
            FieldType::Url => 10,
            FieldType::Html => 11,
            FieldType::Email => 12,
            FieldType::LongString => 13,
            FieldType::MultiEnum => 14,
            FieldType::Regexp => 15,
            FieldType::Document => 17,
            FieldType::Image => 20,
            FieldType::Notepad => 21,
            FieldType::Phone => 22,
            FieldType::Color => 23,
            FieldType::Object => 24,
            FieldType::Geocoordinates => 25,
            FieldType::Unknown(code) => code,
        }
    }
}

impl From<u8> for FieldType {
    fn from(code: u8) -> Self {
        match code {
            0 => FieldType::Reference,
            1 => FieldType::Integer,
            2 => FieldType::Decimal,
            3 => FieldType::String,
            4 => FieldType::Date,
            5 => FieldType::Datetime,
            6 => FieldType::Time,
            7 => FieldType::Enum,
            8 => FieldType::Boolean,
            9 => FieldType::Password,
            10 => FieldType::Url,
            11 => FieldType::Html,
            12 => FieldType::Email,
            13 => FieldType::LongString,
            14 => FieldType::MultiEnum,
            15 => FieldType::Regexp,
            17 => FieldType::Document,
            20 => FieldType::Image,
            21 => FieldType::Notepad,
            22 => FieldType::Phone,
            23 => FieldType::Color,
            24 => FieldType::Object,
            25 => FieldType::Geocoordinates,
            other => FieldType::Unknown(other),
        }
    }
}

/// Where a field is visible in the generic UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum Visibility {
    Hidden,
    List,
    Form,
    #[default]
    Both,
}

impl Visibility {
    pub fn on_list(self) -> bool {
        matches!(self, Visibility::List | Visibility::Both)
    }

    pub fn on_form(self) -> bool {
        matches!(self, Visibility::Form | Visibility::Both)
    }
}

impl From<Visibility> for u8 {
    fn from(v: Visibility) -> u8 {
        match v {
            Visibility::Hidden => 0,
            Visibility::List => 1,
            Visibility::Form => 2,
            Visibility::Both => 3,
        }
    }
}

impl From<u8> for Visibility {
    fn from(code: u8) -> Self {
        match code {
            1 => Visibility::List,
            2 => Visibility::Form,
            3 => Visibility::Both,
            _ => Visibility::Hidden,
        }
    }
}

/// How a field participates in searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum SearchMode {
    #[default]
    None,
    Mono,
    MultiCheckbox,
    MultiList,
    Period,
}

impl From<SearchMode> for u8 {
    fn from(m: SearchMode) -> u8 {
        match m {
            SearchMode::None => 0,
            SearchMode::Mono => 1,
            SearchMode::MultiCheckbox => 2,
            SearchMode::MultiList => 3,
            SearchMode::Period => 4,
        }
    }
}

impl From<u8> for SearchMode {
    fn from(code: u8) -> Self {
        match code {
            1 => SearchMode::Mono,
            2 => SearchMode::MultiCheckbox,
            3 => SearchMode::MultiList,
            4 => SearchMode::Period,
            _ => SearchMode::None,
        }
    }
}

/// One code→value pair of an enumerated field's list of values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListValue {
    pub code: String,
    pub value: String,
}

/// A business-object field definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub visible: Visibility,
    pub search: SearchMode,
    /// True when the field is carried over a reference to another object.
    #[serde(rename = "ref")]
    pub reference: bool,
    #[serde(rename = "listOfValues")]
    pub list_of_values: Option<Vec<ListValue>>,
}

/// Business-object metadata as served by the `metadata` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMetadata {
    pub name: String,
    pub instance: String,
    #[serde(rename = "rowidfield")]
    pub row_id_field_name: String,
    pub label: String,
    pub help: String,
    pub fields: Vec<FieldDef>,
    pub links: Vec<Value>,
}

impl Default for ObjectMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            instance: String::new(),
            row_id_field_name: DEFAULT_ROW_ID_NAME.to_string(),
            label: String::new(),
            help: String::new(),
            fields: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl ObjectMetadata {
    /// Placeholder metadata for a not-yet-fetched object: the label defaults
    /// to the object name and the row ID field to the platform default.
    pub fn new(name: impl Into<String>, instance: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            instance: instance.into(),
            ..Self::default()
        }
    }

    /// Field definition lookup by name: linear scan, first match.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The row ID field definition, when present in `fields`.
    pub fn row_id_field(&self) -> Option<&FieldDef> {
        self.field(&self.row_id_field_name)
    }

    /// Is this field the (non-referenced) row ID field?
    pub fn is_row_id_field(&self, field: &FieldDef) -> bool {
        !field.reference && field.name == self.row_id_field_name
    }

    /// Is this field one of the platform-maintained timestamp fields?
    pub fn is_timestamp_field(field: &FieldDef) -> bool {
        !field.reference && TIMESTAMP_FIELDS.contains(&field.name.as_str())
    }

    /// Resolve an enumerated field's code to its display value; codes without
    /// a list entry (or fields without a list) resolve to themselves.
    pub fn value_for_code<'a>(field: &'a FieldDef, code: &'a str) -> &'a str {
        match &field.list_of_values {
            Some(list) => Self::list_value(list, code).unwrap_or(code),
            None => code,
        }
    }

    /// Resolve a code against a list of values.
    pub fn list_value<'a>(list: &'a [ListValue], code: &str) -> Option<&'a str> {
        list.iter()
            .find(|lv| lv.code == code)
            .map(|lv| lv.value.as_str())
    }
}
