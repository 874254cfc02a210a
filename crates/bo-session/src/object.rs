//! Business-object handle: metadata, CRUD, search and custom operations on
//! one named object instance.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, instrument};

use bizobj_client::{encode_params, Result};

use crate::metadata::{Context, ObjectMetadata, DEFAULT_ROW_ID};
use crate::session::SessionCore;

/// A business-object record, as exchanged with the platform: field name to
/// field value.
pub type Item = serde_json::Map<String, Value>;

/// Local state of one handle: fetched metadata plus the item, filters and
/// list of the most recent operations. Under concurrent use the last
/// completed call wins.
#[derive(Debug)]
struct ObjectState {
    metadata: ObjectMetadata,
    item: Option<Item>,
    filters: Item,
    list: Vec<Value>,
    crosstab_data: Option<Value>,
    count: Option<u64>,
    page: Option<u64>,
    max_page: Option<u64>,
}

/// Options for [`BusinessObject::get_metadata`].
#[derive(Debug, Clone, Default)]
pub struct MetadataOptions {
    pub context: Option<Context>,
    /// Free-form context parameter forwarded to the server.
    pub context_param: Option<String>,
}

/// Options for [`BusinessObject::get_filters`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FiltersOptions {
    pub context: Option<Context>,
    /// Ask the server for the object's default filters instead of the
    /// session's current ones.
    pub reset: bool,
}

/// Options for [`BusinessObject::search`] and [`BusinessObject::count`].
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// 1-based page number; omitted means all pages.
    pub page: Option<u64>,
    /// Document fields to inline as data URLs (field names).
    pub inline_documents: Option<Vec<String>>,
    /// Image fields to inline as thumbnails (field names).
    pub inline_thumbnails: Option<Vec<String>>,
    /// Object fields to inline (field names).
    pub inline_objects: Option<Vec<String>>,
    /// Refresh this handle's metadata from the response.
    pub with_metadata: bool,
    /// Restrict the result to list-visible fields.
    pub visible_only: bool,
    pub context: Option<Context>,
}

/// Options for [`BusinessObject::get`] and the `get_for_*` variants.
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    pub context: Option<Context>,
    pub inline_documents: Option<Vec<String>>,
    pub inline_thumbnails: Option<Vec<String>>,
    pub inline_objects: Option<Vec<String>>,
    /// Name of a tree view to fetch the record through; the response is then
    /// the tree data rather than the bare item.
    pub tree_view: Option<String>,
    /// Restrict the returned item to these fields. Dotted referenced-field
    /// names are translated to the platform's `__` convention.
    pub fields: Option<Vec<String>>,
    /// Refresh this handle's metadata from the response.
    pub with_metadata: bool,
    /// Include social-post data with the record.
    pub social: bool,
}

/// Options for [`BusinessObject::action`].
#[derive(Debug, Clone, Default)]
pub struct ActionOptions {
    /// Row ID the action applies to, for single-record actions.
    pub row_id: Option<String>,
    /// Action parameters, form-encoded into the request body.
    pub parameters: Option<Item>,
}

/// Options for [`BusinessObject::crosstab`].
#[derive(Debug, Clone, Default)]
pub struct CrosstabOptions {
    pub filters: Option<Item>,
}

/// Options for [`BusinessObject::print`].
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// Filters to make current before printing.
    pub filters: Option<Item>,
    /// Print all records instead of the current selection.
    pub all: bool,
    /// Send the result as a mailing instead of returning the document.
    pub mailing: bool,
}

/// Handle on one business-object instance.
///
/// Obtained from [`crate::Session::get_business_object`]; handles for the
/// same `name:instance` pair share local state.
pub struct BusinessObject {
    core: Arc<SessionCore>,
    name: String,
    instance: String,
    path: String,
    state: RwLock<ObjectState>,
}

impl BusinessObject {
    pub(crate) fn new(core: Arc<SessionCore>, name: String, instance: String) -> Self {
        let path = core.object_path(&name, &instance);
        let state = ObjectState {
            metadata: ObjectMetadata::new(&name, &instance),
            item: None,
            filters: Item::new(),
            list: Vec::new(),
            crosstab_data: None,
            count: None,
            page: None,
            max_page: None,
        };
        Self {
            core,
            name,
            instance,
            path,
            state: RwLock::new(state),
        }
    }

    fn state(&self) -> RwLockReadGuard<'_, ObjectState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, ObjectState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Object instance name.
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// The handle's current metadata (placeholder until fetched).
    pub fn metadata(&self) -> ObjectMetadata {
        self.state().metadata.clone()
    }

    /// Name of the object's row ID field.
    pub fn row_id_field_name(&self) -> String {
        self.state().metadata.row_id_field_name.clone()
    }

    /// The item of the most recent get/save operation, if any.
    pub fn item(&self) -> Option<Item> {
        self.state().item.clone()
    }

    /// Row ID of the current item, if any.
    pub fn row_id(&self) -> Option<String> {
        let state = self.state();
        state
            .item
            .as_ref()
            .and_then(|item| item.get(&state.metadata.row_id_field_name))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// The current search filters.
    pub fn filters(&self) -> Item {
        self.state().filters.clone()
    }

    /// The list of the most recent search, if any.
    pub fn list(&self) -> Vec<Value> {
        self.state().list.clone()
    }

    /// Record count of the most recent search or count operation.
    pub fn count_value(&self) -> Option<u64> {
        self.state().count
    }

    /// 1-based page of the most recent paginated search, if any.
    pub fn page(&self) -> Option<u64> {
        self.state().page
    }

    /// Total page count of the most recent paginated search, if any.
    pub fn max_page(&self) -> Option<u64> {
        self.state().max_page
    }

    /// Data of the most recent crosstab operation, if any.
    pub fn crosstab_data(&self) -> Option<Value> {
        self.state().crosstab_data.clone()
    }

    fn action_path(&self, action: &str) -> String {
        format!("{}&action={action}", self.path)
    }

    fn push_param(path: &mut String, name: &str, value: &str) {
        path.push('&');
        path.push_str(name);
        path.push('=');
        path.push_str(&urlencoding::encode(value));
    }

    fn push_inlines(
        path: &mut String,
        documents: &Option<Vec<String>>,
        thumbnails: &Option<Vec<String>>,
        objects: &Option<Vec<String>>,
    ) {
        if let Some(fields) = documents {
            Self::push_param(path, "inline_documents", &fields.join(","));
        }
        if let Some(fields) = thumbnails {
            Self::push_param(path, "inline_thumbnails", &fields.join(","));
        }
        if let Some(fields) = objects {
            Self::push_param(path, "inline_objects", &fields.join(","));
        }
    }

    /// Translate the server's 0-based page number to the 1-based convention
    /// used locally; negative means unpaginated.
    fn local_page(value: Option<&Value>) -> Option<u64> {
        value
            .and_then(Value::as_i64)
            .and_then(|p| if p >= 0 { Some(p as u64 + 1) } else { None })
    }

    fn store_paging(state: &mut ObjectState, payload: &Value) {
        state.count = payload.get("count").and_then(Value::as_u64);
        state.page = Self::local_page(payload.get("page"));
        state.max_page = Self::local_page(payload.get("maxpage"));
    }

    fn refresh_metadata(state: &mut ObjectState, payload: &Value) {
        if let Some(meta) = payload.get("meta") {
            if let Ok(meta) = serde_json::from_value::<ObjectMetadata>(meta.clone()) {
                state.metadata = meta;
            }
        }
    }

    /// Fetch the object's metadata and cache it on this handle.
    #[instrument(skip(self, options), fields(object = %self.name))]
    pub async fn get_metadata(&self, options: MetadataOptions) -> Result<ObjectMetadata> {
        let mut path = self.action_path("metadata");
        if let Some(context) = options.context {
            Self::push_param(&mut path, "context", &context.code().to_string());
        }
        if let Some(ref param) = options.context_param {
            Self::push_param(&mut path, "contextparam", param);
        }

        let payload = self.core.call(&path, None).await?;
        let metadata: ObjectMetadata = serde_json::from_value(payload)?;
        self.state_mut().metadata = metadata.clone();
        Ok(metadata)
    }

    /// Fetch the object's current (or, with `reset`, default) search filters
    /// and make them this handle's filters.
    #[instrument(skip(self, options), fields(object = %self.name))]
    pub async fn get_filters(&self, options: FiltersOptions) -> Result<Item> {
        let mut path = self.action_path("filters");
        if let Some(context) = options.context {
            Self::push_param(&mut path, "context", &context.code().to_string());
        }
        if options.reset {
            path.push_str("&reset=true");
        }

        let payload = self.core.call(&path, None).await?;
        let filters = payload.as_object().cloned().unwrap_or_default();
        self.state_mut().filters = filters.clone();
        Ok(filters)
    }

    /// Count the records matching the given (or current) filters. Resets the
    /// local list.
    #[instrument(skip(self, filters), fields(object = %self.name))]
    pub async fn count(&self, filters: Option<Item>) -> Result<u64> {
        let body = {
            let mut state = self.state_mut();
            if let Some(filters) = filters {
                state.filters = filters;
            }
            encode_params(&state.filters)
        };

        let payload = self.core.call(&self.action_path("count"), Some(body)).await?;
        let count = payload.get("count").and_then(Value::as_u64).unwrap_or(0);

        let mut state = self.state_mut();
        Self::store_paging(&mut state, &payload);
        state.list = Vec::new();
        Ok(count)
    }

    /// Search records matching the given (or current) filters.
    #[instrument(skip(self, filters, options), fields(object = %self.name))]
    pub async fn search(
        &self,
        filters: Option<Item>,
        options: SearchOptions,
    ) -> Result<Vec<Value>> {
        let mut path = self.action_path("search");
        if let Some(page) = options.page {
            // The wire page number is 0-based; page 0 means unpaginated and
            // sends no parameter.
            if page > 0 {
                Self::push_param(&mut path, "page", &(page - 1).to_string());
            }
        }
        Self::push_inlines(
            &mut path,
            &options.inline_documents,
            &options.inline_thumbnails,
            &options.inline_objects,
        );
        if options.with_metadata {
            path.push_str("&_md=true");
        }
        if options.visible_only {
            path.push_str("&_visible=true");
        }
        if let Some(context) = options.context {
            Self::push_param(&mut path, "context", &context.code().to_string());
        }

        let body = {
            let mut state = self.state_mut();
            if let Some(filters) = filters {
                state.filters = filters;
            }
            encode_params(&state.filters)
        };

        let payload = self.core.call(&path, Some(body)).await?;

        let mut state = self.state_mut();
        Self::refresh_metadata(&mut state, &payload);
        Self::store_paging(&mut state, &payload);
        state.list = payload
            .get("list")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        debug!(results = state.list.len(), "Search done");
        Ok(state.list.clone())
    }

    /// Fetch one record by row ID.
    ///
    /// Without a tree view the returned value is the item itself; with one it
    /// is the full tree data, and the item is lifted out of `data.item`.
    #[instrument(skip(self, options), fields(object = %self.name, row_id = %row_id))]
    pub async fn get(&self, row_id: &str, options: GetOptions) -> Result<Value> {
        let mut path = self.action_path("get");
        Self::push_param(&mut path, &self.row_id_field_name(), row_id);
        Self::push_inlines(
            &mut path,
            &options.inline_documents,
            &options.inline_thumbnails,
            &options.inline_objects,
        );
        if let Some(ref tree_view) = options.tree_view {
            Self::push_param(&mut path, "treeview", tree_view);
        }
        if let Some(ref fields) = options.fields {
            // One parameter per field.
            for field in fields {
                Self::push_param(&mut path, "fields", &field.replace('.', "__"));
            }
        }
        if options.with_metadata {
            path.push_str("&_md=true");
        }
        if options.social {
            path.push_str("&_social=true");
        }
        if let Some(context) = options.context {
            Self::push_param(&mut path, "context", &context.code().to_string());
        }

        let payload = self.core.call(&path, None).await?;

        let mut state = self.state_mut();
        Self::refresh_metadata(&mut state, &payload);
        // Some platform versions wrap the record in a data envelope.
        let wrapped = payload.get("data").cloned();
        if options.tree_view.is_some() {
            let item = match &wrapped {
                Some(data) => data.get("item"),
                None => payload.get("item"),
            };
            state.item = item.and_then(Value::as_object).cloned();
            Ok(payload)
        } else {
            let item_value = wrapped.unwrap_or(payload);
            state.item = item_value.as_object().cloned();
            Ok(item_value)
        }
    }

    /// Fetch a server-initialized draft for record creation (row ID `0`).
    pub async fn get_for_create(&self, options: GetOptions) -> Result<Value> {
        self.get_in_context(DEFAULT_ROW_ID, options, Context::Create)
            .await
    }

    /// Fetch a record prepared for update.
    pub async fn get_for_update(&self, row_id: &str, options: GetOptions) -> Result<Value> {
        self.get_in_context(row_id, options, Context::Update).await
    }

    /// Fetch a record prepared for copy.
    pub async fn get_for_copy(&self, row_id: &str, options: GetOptions) -> Result<Value> {
        self.get_in_context(row_id, options, Context::Copy).await
    }

    /// Fetch a record ahead of deletion.
    pub async fn get_for_delete(&self, row_id: &str, options: GetOptions) -> Result<Value> {
        // The platform serves deletion reads under the create context.
        self.get_in_context(row_id, options, Context::Create).await
    }

    async fn get_in_context(
        &self,
        row_id: &str,
        mut options: GetOptions,
        context: Context,
    ) -> Result<Value> {
        options.tree_view = None;
        options.fields = None;
        options.context = Some(context);
        self.get(row_id, options).await
    }

    /// Re-run the server-side population logic on a record (computed and
    /// defaulted fields).
    #[instrument(skip(self), fields(object = %self.name, row_id = %row_id))]
    pub async fn populate(&self, row_id: &str) -> Result<Value> {
        let mut path = self.action_path("populate");
        Self::push_param(&mut path, &self.row_id_field_name(), row_id);

        let payload = self.core.call(&path, None).await?;
        self.state_mut().item = payload.as_object().cloned();
        Ok(payload)
    }

    /// Save an item: create when its row ID is absent, empty or the `0`
    /// sentinel, update otherwise.
    pub async fn save(&self, item: Item) -> Result<Value> {
        let row_id_name = self.row_id_field_name();
        let is_new = match item.get(&row_id_name) {
            None | Some(Value::Null) => true,
            Some(Value::String(id)) => id.is_empty() || id == DEFAULT_ROW_ID,
            Some(other) => other.as_i64() == Some(0),
        };
        if is_new {
            self.create(item).await
        } else {
            self.update(item).await
        }
    }

    /// Create a record from the given item. The row ID is forced to the `0`
    /// sentinel so the server always treats the item as new.
    #[instrument(skip(self, item), fields(object = %self.name))]
    pub async fn create(&self, mut item: Item) -> Result<Value> {
        item.insert(
            self.row_id_field_name(),
            Value::String(DEFAULT_ROW_ID.to_string()),
        );
        self.write_item("create", item).await
    }

    /// Update a record from the given item (matched by its row ID).
    #[instrument(skip(self, item), fields(object = %self.name))]
    pub async fn update(&self, item: Item) -> Result<Value> {
        self.write_item("update", item).await
    }

    async fn write_item(&self, action: &str, item: Item) -> Result<Value> {
        let body = encode_params(&item);
        let payload = self.core.call(&self.action_path(action), Some(body)).await?;

        // Some platform versions wrap the saved item in a data envelope.
        let item_value = match payload {
            Value::Object(ref map) if map.contains_key("data") => payload["data"].clone(),
            other => other,
        };
        self.state_mut().item = item_value.as_object().cloned();
        Ok(item_value)
    }

    /// Delete a record by row ID. Clears the local item.
    #[instrument(skip(self), fields(object = %self.name, row_id = %row_id))]
    pub async fn delete(&self, row_id: &str) -> Result<Value> {
        let mut path = self.action_path("delete");
        Self::push_param(&mut path, &self.row_id_field_name(), row_id);

        let mut payload = self.core.call(&path, None).await?;
        // The undo/redo bookkeeping is of no use to API callers.
        if let Some(map) = payload.as_object_mut() {
            map.remove("undoredo");
        }
        self.state_mut().item = None;
        Ok(payload)
    }

    /// Invoke a custom action published on the object, optionally against one
    /// record and with form-encoded parameters.
    #[instrument(skip(self, options), fields(object = %self.name, action = %name))]
    pub async fn action(&self, name: &str, options: ActionOptions) -> Result<Value> {
        let mut path = self.action_path(name);
        if let Some(ref row_id) = options.row_id {
            Self::push_param(&mut path, &self.row_id_field_name(), row_id);
        }
        let body = options.parameters.as_ref().map(|p| encode_params(p));

        let payload = self.core.call(&path, body).await?;
        Ok(match payload {
            Value::Object(ref map) if map.contains_key("result") => payload["result"].clone(),
            other => other,
        })
    }

    /// Compute a crosstab (pivot) published on the object, over the given
    /// (or current) filters.
    #[instrument(skip(self, options), fields(object = %self.name, crosstab = %name))]
    pub async fn crosstab(&self, name: &str, options: CrosstabOptions) -> Result<Value> {
        let mut path = self.action_path("crosstab");
        Self::push_param(&mut path, "crosstab", name);

        let body = {
            let mut state = self.state_mut();
            if let Some(filters) = options.filters {
                state.filters = filters;
            }
            encode_params(&state.filters)
        };

        let payload = self.core.call(&path, Some(body)).await?;
        self.state_mut().crosstab_data = Some(payload.clone());
        Ok(payload)
    }

    /// Produce a publication (print template) over the current selection, or
    /// with `all` over every record.
    #[instrument(skip(self, options), fields(object = %self.name, template = %template))]
    pub async fn print(&self, template: &str, options: PrintOptions) -> Result<Value> {
        if let Some(filters) = options.filters {
            self.state_mut().filters = filters;
        }
        let mut path = self.action_path("print");
        Self::push_param(&mut path, "printtemplate", template);
        if options.all {
            path.push_str("&all=true");
        }
        if options.mailing {
            path.push_str("&mailing=true");
        }

        let payload = self.core.call(&path, None).await?;
        Ok(match payload {
            Value::Object(ref map) if map.contains_key("result") => payload["result"].clone(),
            other => other,
        })
    }

    /// Set (or, without a value, reset) an object parameter.
    #[instrument(skip(self, value), fields(object = %self.name, param = %name))]
    pub async fn set_parameter(&self, name: &str, value: Option<&str>) -> Result<Value> {
        let mut params = Item::new();
        params.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(value) = value {
            params.insert("value".to_string(), Value::String(value.to_string()));
        }

        let payload = self
            .core
            .call(&self.action_path("setparameter"), Some(encode_params(&params)))
            .await?;
        Ok(payload.get("result").cloned().unwrap_or(payload))
    }

    /// Get an object parameter value.
    #[instrument(skip(self), fields(object = %self.name, param = %name))]
    pub async fn get_parameter(&self, name: &str) -> Result<Value> {
        let mut params = Item::new();
        params.insert("name".to_string(), Value::String(name.to_string()));

        let payload = self
            .core
            .call(&self.action_path("getparameter"), Some(encode_params(&params)))
            .await?;
        Ok(payload.get("result").cloned().unwrap_or(payload))
    }
}

impl std::fmt::Debug for BusinessObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusinessObject")
            .field("name", &self.name)
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}
