//! Browser: message/update loop over the navigation state
//!
//! [`Browser`] owns the [`NavigationState`], the list of the active view and
//! the last error. Every forward or backward move is computed on a clone of
//! the navigation state; the clone is committed together with its freshly
//! fetched list only when the fetch succeeds, so a failed call leaves the
//! current view and selection exactly as they were.

mod formatters;
mod list;
mod message;
mod presentation;


use std::sync::Arc;

use azct_provider::log_sanitizer::{redact_secret, truncate_for_log};
use azct_provider::{Resource, ResourceProvider, UserInfo};
use chrono::Utc;

pub use list::{ActiveList, MenuEntry, VaultItemKind};
pub use message::BrowserMessage;
pub use presentation::type_display_name;

use self::formatters::HandlerRows;
use crate::error::{CoreError, CoreResult};
use crate::filter::{FilterableList, RowFormatter};
use crate::handlers::{DefaultHandler, detail};
use crate::hierarchy;
use crate::navigation::{NavigationState, ViewKind};
use crate::registry::HandlerRegistry;
use crate::traits::{ActionContext, ActionRequest, BrowserConfig, ConfigService, ResourceHandler};
use crate::types::{StatusSummary, ViewSnapshot};
use crate::utils::datetime::DEFAULT_DATE_FORMAT;

/// A navigation step awaiting its fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Transition {
    ResourceGroups { id: String, name: String },
    ResourceTypes(String),
    Resources(String),
    ResourceType(String),
    StorageExplorer { account: String, resource_group: String },
    Blobs(String),
    BlobFolder(String),
    VaultExplorer { name: String, url: String },
    VaultItems(VaultItemKind),
    Menu,
    Back,
}

impl Transition {
    fn apply(self, nav: &mut NavigationState) {
        match self {
            Self::ResourceGroups { id, name } => nav.navigate_to_resource_groups(&id, &name),
            Self::ResourceTypes(group) => nav.navigate_to_resource_types(&group),
            Self::Resources(group) => nav.navigate_to_resources(&group),
            Self::ResourceType(resource_type) => nav.navigate_to_resource_type(&resource_type),
            Self::StorageExplorer {
                account,
                resource_group,
            } => nav.navigate_to_storage_explorer(&account, &resource_group),
            Self::Blobs(container) => nav.navigate_to_blobs(&container),
            Self::BlobFolder(prefix) => nav.navigate_into_blob_folder(&prefix),
            Self::VaultExplorer { name, url } => nav.navigate_to_vault_explorer(&name, &url),
            Self::VaultItems(VaultItemKind::Secrets) => nav.navigate_to_vault_secrets(),
            Self::VaultItems(VaultItemKind::Keys) => nav.navigate_to_vault_keys(),
            Self::VaultItems(VaultItemKind::Certificates) => nav.navigate_to_vault_certificates(),
            Self::Menu => nav.navigate_to_menu(),
            Self::Back => nav.navigate_back(),
        }
    }
}

/// What the detail overlay should show for the selected row. Blobs and vault
/// items are re-fetched by name for their full record.
enum DetailSource {
    Ready(String),
    Blob { key: String },
    Secret(String),
    Key(String),
    Certificate(String),
}

fn loaded<T>(formatter: Arc<dyn RowFormatter<T>>, records: Vec<T>) -> FilterableList<T> {
    let mut list = FilterableList::new(formatter);
    list.load(records);
    list
}

fn required(value: Option<&String>) -> CoreResult<&str> {
    value.map(String::as_str).ok_or(CoreError::NothingSelected)
}

/// Browser core: navigation, lists and detail overlay for one session.
pub struct Browser {
    provider: Arc<dyn ResourceProvider>,
    registry: Arc<HandlerRegistry>,
    config: BrowserConfig,
    nav: NavigationState,
    list: ActiveList,
    user: Option<UserInfo>,
    detail: Option<String>,
    last_error: Option<String>,
}

impl Browser {
    /// An unusable date format is replaced by the default one.
    pub fn new(
        provider: Arc<dyn ResourceProvider>,
        registry: Arc<HandlerRegistry>,
        mut config: BrowserConfig,
    ) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("{e}, using {DEFAULT_DATE_FORMAT}");
            config.date_format = DEFAULT_DATE_FORMAT.to_string();
        }
        Self {
            provider,
            registry,
            nav: NavigationState::new(config.delimiter),
            list: ActiveList::Subscriptions(FilterableList::new(formatters::subscriptions())),
            config,
            user: None,
            detail: None,
            last_error: None,
        }
    }

    /// Browser configured from `config_service`.
    pub async fn with_config_service(
        provider: Arc<dyn ResourceProvider>,
        registry: Arc<HandlerRegistry>,
        config_service: &dyn ConfigService,
    ) -> CoreResult<Self> {
        let config = config_service.load().await?;
        Ok(Self::new(provider, registry, config))
    }

    /// Load the signed-in identity and the subscription list.
    ///
    /// A missing identity is logged and tolerated; the subscription fetch
    /// must succeed.
    pub async fn start(&mut self) -> CoreResult<()> {
        match self.provider.current_user().await {
            Ok(user) => {
                log::info!("Signed in as {} ({})", user.name, user.email);
                self.user = Some(user);
            }
            Err(e) => log::warn!("Could not resolve current user: {e}"),
        }
        let result = self.refresh().await;
        self.record(result)
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn list(&self) -> &ActiveList {
        &self.list
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Apply one message.
    ///
    /// Errors are also kept as the snapshot's last error; the view is left
    /// as it was.
    pub async fn update(&mut self, msg: BrowserMessage) -> CoreResult<()> {
        log::debug!("Browser message: {}", truncate_for_log(&format!("{msg:?}")));
        let result = match msg {
            BrowserMessage::SelectNext => {
                self.list.select_next();
                Ok(())
            }
            BrowserMessage::SelectPrevious => {
                self.list.select_previous();
                Ok(())
            }
            BrowserMessage::SelectFirst => {
                self.list.select_first();
                Ok(())
            }
            BrowserMessage::SelectLast => {
                self.list.select_last();
                Ok(())
            }
            BrowserMessage::Confirm => self.confirm().await,
            BrowserMessage::Back => self.back().await,
            BrowserMessage::ShowDetail => self.show_detail().await,
            BrowserMessage::OpenMenu => {
                if self.nav.is_showing_detail() {
                    Ok(())
                } else {
                    self.navigate(Transition::Menu).await
                }
            }
            BrowserMessage::SetFilter(text) => {
                if !self.nav.is_showing_detail() {
                    self.list.set_filter(&text);
                }
                Ok(())
            }
            BrowserMessage::ClearFilter => {
                self.list.clear_filter();
                Ok(())
            }
            BrowserMessage::Action(key) => self.action(key).await,
            BrowserMessage::Refresh => self.refresh().await,
        };
        self.record(result)
    }

    fn record(&mut self, result: CoreResult<()>) -> CoreResult<()> {
        if let Err(e) = &result {
            if e.is_expected() {
                log::warn!("{e}");
            } else {
                log::error!("{e}");
            }
            self.last_error = Some(e.to_string());
        }
        result
    }

    /// Read-only view of everything a renderer needs.
    pub fn snapshot(&self) -> ViewSnapshot {
        let row_handler = match &self.list {
            ActiveList::Resources(list) => list
                .selected_record()
                .map(|resource| self.handler_for(&resource.resource_type)),
            _ => None,
        };
        ViewSnapshot {
            view: self.nav.view(),
            title: presentation::title(&self.nav, &self.registry),
            breadcrumb: self.nav.breadcrumb(),
            columns: self.list.columns(),
            rows: self.list.rows(),
            selected: self.list.selected(),
            status: StatusSummary {
                total_count: self.list.total_count(),
                filtered_count: self.list.filtered_count(),
                filter_active: self.list.is_filtered(),
                filter: self.list.filter().to_string(),
                actions: presentation::key_hints(&self.nav, row_handler.as_deref()),
                last_error: self.last_error.clone(),
            },
            detail: if self.nav.is_showing_detail() {
                self.detail.clone()
            } else {
                None
            },
            user: self.user.clone(),
        }
    }

    // ========== 导航 ==========

    async fn navigate(&mut self, transition: Transition) -> CoreResult<()> {
        let mut candidate = self.nav.clone();
        transition.apply(&mut candidate);
        let list = self.fetch(&candidate).await?;
        self.nav = candidate;
        self.list = list;
        self.detail = None;
        self.last_error = None;
        Ok(())
    }

    async fn back(&mut self) -> CoreResult<()> {
        if self.nav.is_showing_detail() {
            self.nav.hide_detail();
            self.detail = None;
            return Ok(());
        }
        if self.nav.view() == ViewKind::Subscriptions {
            return Ok(());
        }
        self.navigate(Transition::Back).await
    }

    /// Re-fetch the current view, keeping the filter text.
    async fn refresh(&mut self) -> CoreResult<()> {
        let filter = self.list.filter().to_string();
        let mut list = self.fetch(&self.nav).await?;
        list.set_filter(&filter);
        self.list = list;
        self.last_error = None;
        Ok(())
    }

    async fn confirm(&mut self) -> CoreResult<()> {
        if self.nav.is_showing_detail() {
            return Ok(());
        }
        let transition = match &self.list {
            ActiveList::Subscriptions(list) => {
                let sub = list.selected_record().ok_or(CoreError::NothingSelected)?;
                let name = if sub.display_name.is_empty() {
                    sub.name.clone()
                } else {
                    sub.display_name.clone()
                };
                Transition::ResourceGroups {
                    id: sub.id.clone(),
                    name,
                }
            }
            ActiveList::ResourceGroups(list) => {
                let group = list.selected_record().ok_or(CoreError::NothingSelected)?;
                Transition::ResourceTypes(group.name.clone())
            }
            ActiveList::TypeSummary(list) => {
                let summary = list.selected_record().ok_or(CoreError::NothingSelected)?;
                if !self.handler_for(&summary.resource_type).can_list_from_summary() {
                    log::debug!("{} cannot be listed from the summary", summary.resource_type);
                    return Ok(());
                }
                Transition::ResourceType(summary.resource_type.clone())
            }
            ActiveList::Containers(list) => {
                let container = list.selected_record().ok_or(CoreError::NothingSelected)?;
                Transition::Blobs(container.name.clone())
            }
            ActiveList::Blobs(list) => {
                let node = list.selected_record().ok_or(CoreError::NothingSelected)?;
                if !node.is_directory {
                    return self.show_detail().await;
                }
                Transition::BlobFolder(node.full_key.clone())
            }
            ActiveList::VaultItemKinds(list) => {
                let kind = list.selected_record().ok_or(CoreError::NothingSelected)?;
                Transition::VaultItems(*kind)
            }
            ActiveList::Menu(list) => {
                let entry = list.selected_record().ok_or(CoreError::NothingSelected)?;
                if self.nav.context().subscription_id.is_none() {
                    return Err(CoreError::NothingSelected);
                }
                Transition::ResourceType(entry.resource_type.clone())
            }
            ActiveList::Resources(_)
            | ActiveList::Secrets(_)
            | ActiveList::Keys(_)
            | ActiveList::Certificates(_) => return self.show_detail().await,
        };
        self.navigate(transition).await
    }

    async fn action(&mut self, key: char) -> CoreResult<()> {
        if self.nav.is_showing_detail() {
            return Ok(());
        }
        match &self.list {
            ActiveList::Resources(list) => {
                let resource = list
                    .selected_record()
                    .ok_or(CoreError::NothingSelected)?
                    .clone();
                if key == 't' && self.nav.view() == ViewKind::ResourceList {
                    return self
                        .navigate(Transition::ResourceType(resource.resource_type))
                        .await;
                }
                self.resource_action(&resource, key).await
            }
            ActiveList::ResourceGroups(list) if key == 'a' => {
                let group = list
                    .selected_record()
                    .ok_or(CoreError::NothingSelected)?
                    .name
                    .clone();
                self.navigate(Transition::Resources(group)).await
            }
            ActiveList::Secrets(list) if key == 'v' => {
                let name = list
                    .selected_record()
                    .ok_or(CoreError::NothingSelected)?
                    .name
                    .clone();
                self.reveal_secret(&name).await
            }
            _ if key == 'd' => self.show_detail().await,
            _ => {
                log::debug!("Key '{key}' is not bound in {:?}", self.nav.view());
                Ok(())
            }
        }
    }

    /// Run the handler action bound to `key` and apply what it requests.
    async fn resource_action(
        &mut self,
        resource: &Resource,
        key: char,
    ) -> CoreResult<()> {
        let handler = self.handler_for(&resource.resource_type);
        let Some(action) = handler.actions().into_iter().find(|a| a.key == key) else {
            log::debug!("{} has no action bound to '{key}'", handler.display_name());
            return Ok(());
        };

        let requests = {
            let mut ctx = ActionContext::new(self.nav.context());
            if !action.invoke(resource, &mut ctx) {
                return Ok(());
            }
            ctx.into_requests()
        };

        for request in requests {
            match request {
                ActionRequest::ShowDetail => self.show_detail().await?,
                ActionRequest::ExploreStorage {
                    account,
                    resource_group,
                } if handler.can_explore() => {
                    self.navigate(Transition::StorageExplorer {
                        account,
                        resource_group,
                    })
                    .await?;
                }
                ActionRequest::ExploreVault { name, url } if handler.can_explore() => {
                    self.navigate(Transition::VaultExplorer { name, url }).await?;
                }
                other => log::debug!("Ignoring {other:?} from {}", handler.display_name()),
            }
        }
        Ok(())
    }

    // ========== 详情 ==========

    async fn show_detail(&mut self) -> CoreResult<()> {
        if self.nav.is_showing_detail() {
            return Ok(());
        }
        let ctx = self.nav.context();
        let format = self.config.date_format.as_str();
        let vault = ctx.vault_name.clone().unwrap_or_default();
        let text = match self.detail_source()? {
            Some(DetailSource::Ready(text)) => text,
            Some(DetailSource::Blob { key }) => {
                let account = ctx.storage_ref().ok_or(CoreError::NothingSelected)?;
                let container = required(ctx.container.as_ref())?;
                let blob = self
                    .provider
                    .get_blob_detail(&account, container, &key)
                    .await
                    .map_err(|e| CoreError::fetch("get blob details", e))?;
                detail::blob_report(&blob, &account.account, container, format)
            }
            Some(DetailSource::Secret(name)) => {
                let secret = self
                    .provider
                    .get_secret(required(ctx.vault_url.as_ref())?, &name)
                    .await
                    .map_err(|e| CoreError::fetch("get secret", e))?;
                detail::secret_report(&secret, &vault, format, Utc::now())
            }
            Some(DetailSource::Key(name)) => {
                let key = self
                    .provider
                    .get_vault_key(required(ctx.vault_url.as_ref())?, &name)
                    .await
                    .map_err(|e| CoreError::fetch("get key", e))?;
                detail::key_report(&key, &vault, format, Utc::now())
            }
            Some(DetailSource::Certificate(name)) => {
                let certificate = self
                    .provider
                    .get_certificate(required(ctx.vault_url.as_ref())?, &name)
                    .await
                    .map_err(|e| CoreError::fetch("get certificate", e))?;
                detail::certificate_report(&certificate, &vault, format, Utc::now())
            }
            None => return Ok(()),
        };
        self.detail = Some(text);
        self.nav.show_detail();
        Ok(())
    }

    /// `None` for rows without a detail report (type summary, menu, folders).
    fn detail_source(&self) -> CoreResult<Option<DetailSource>> {
        let ctx = self.nav.context();

        let source = match &self.list {
            ActiveList::Subscriptions(list) => DetailSource::Ready(detail::subscription_report(
                list.selected_record().ok_or(CoreError::NothingSelected)?,
            )),
            ActiveList::ResourceGroups(list) => DetailSource::Ready(detail::resource_group_report(
                list.selected_record().ok_or(CoreError::NothingSelected)?,
                ctx.subscription_id.as_deref().unwrap_or_default(),
            )),
            ActiveList::Resources(list) => {
                let resource = list.selected_record().ok_or(CoreError::NothingSelected)?;
                DetailSource::Ready(
                    self.handler_for(&resource.resource_type)
                        .render_detail(resource, ctx),
                )
            }
            ActiveList::Containers(list) => DetailSource::Ready(detail::container_report(
                list.selected_record().ok_or(CoreError::NothingSelected)?,
                ctx.storage_account.as_deref().unwrap_or_default(),
                &self.config.date_format,
            )),
            ActiveList::Blobs(list) => {
                let node = list.selected_record().ok_or(CoreError::NothingSelected)?;
                if node.is_directory {
                    return Ok(None);
                }
                DetailSource::Blob {
                    key: node.full_key.clone(),
                }
            }
            ActiveList::Secrets(list) => DetailSource::Secret(
                list.selected_record()
                    .ok_or(CoreError::NothingSelected)?
                    .name
                    .clone(),
            ),
            ActiveList::Keys(list) => DetailSource::Key(
                list.selected_record()
                    .ok_or(CoreError::NothingSelected)?
                    .name
                    .clone(),
            ),
            ActiveList::Certificates(list) => DetailSource::Certificate(
                list.selected_record()
                    .ok_or(CoreError::NothingSelected)?
                    .name
                    .clone(),
            ),
            ActiveList::TypeSummary(_) | ActiveList::VaultItemKinds(_) | ActiveList::Menu(_) => {
                return Ok(None);
            }
        };
        Ok(Some(source))
    }

    async fn reveal_secret(&mut self, name: &str) -> CoreResult<()> {
        let ctx = self.nav.context();
        let url = required(ctx.vault_url.as_ref())?.to_string();
        let vault = ctx.vault_name.clone().unwrap_or_default();

        let value = self
            .provider
            .get_secret_value(&url, name)
            .await
            .map_err(|e| CoreError::fetch("get secret value", e))?;
        log::info!("Revealed secret '{name}' from {vault}: {}", redact_secret(&value));

        self.detail = Some(detail::secret_value_report(name, &vault, &value));
        self.nav.show_detail();
        Ok(())
    }

    // ========== 数据加载 ==========

    /// Handler for `type_key`; the generic handler when none is registered.
    fn handler_for(&self, type_key: &str) -> Arc<dyn ResourceHandler> {
        self.registry.lookup_or_default(type_key).unwrap_or_else(|e| {
            log::debug!("{e}, using generic columns");
            Arc::new(DefaultHandler)
        })
    }

    /// Fetch the list `nav` would display.
    async fn fetch(&self, nav: &NavigationState) -> CoreResult<ActiveList> {
        let ctx = nav.context();
        let format = self.config.date_format.clone();
        log::debug!("Loading {:?}", nav.view());

        let list = match nav.view() {
            ViewKind::Subscriptions => {
                let subs = self
                    .provider
                    .list_subscriptions()
                    .await
                    .map_err(|e| CoreError::fetch("list subscriptions", e))?;
                ActiveList::Subscriptions(loaded(formatters::subscriptions(), subs))
            }
            ViewKind::ResourceGroups => {
                let sub = required(ctx.subscription_id.as_ref())?;
                let groups = self
                    .provider
                    .list_resource_groups(sub)
                    .await
                    .map_err(|e| CoreError::fetch("list resource groups", e))?;
                ActiveList::ResourceGroups(loaded(
                    formatters::resource_groups(sub.to_string()),
                    groups,
                ))
            }
            ViewKind::ResourceTypesSummary => {
                let scope = ctx.resource_scope().ok_or(CoreError::NothingSelected)?;
                let summary = self
                    .provider
                    .resource_type_summary(&scope)
                    .await
                    .map_err(|e| CoreError::fetch("summarize resource types", e))?;
                ActiveList::TypeSummary(loaded(formatters::type_summary(), summary))
            }
            ViewKind::ResourceList | ViewKind::ResourceTypeFiltered => {
                let scope = ctx.resource_scope().ok_or(CoreError::NothingSelected)?;
                let resources = self
                    .provider
                    .list_resources(&scope)
                    .await
                    .map_err(|e| CoreError::fetch("list resources", e))?;
                let type_key = ctx.resource_type.as_deref().unwrap_or_default();
                let rows: Arc<dyn RowFormatter<Resource>> =
                    Arc::new(HandlerRows(self.handler_for(type_key)));
                ActiveList::Resources(loaded(rows, resources))
            }
            ViewKind::StorageExplorer => {
                let account = ctx.storage_ref().ok_or(CoreError::NothingSelected)?;
                let containers = self
                    .provider
                    .list_containers(&account)
                    .await
                    .map_err(|e| CoreError::fetch("list containers", e))?;
                ActiveList::Containers(loaded(formatters::containers(format), containers))
            }
            ViewKind::BlobBrowser => {
                let account = ctx.storage_ref().ok_or(CoreError::NothingSelected)?;
                let container = required(ctx.container.as_ref())?;
                let keys = self
                    .provider
                    .list_keys(&account, container, &ctx.prefix)
                    .await
                    .map_err(|e| CoreError::fetch("list blobs", e))?;
                let nodes = hierarchy::project(&keys, &ctx.prefix, nav.delimiter());
                ActiveList::Blobs(loaded(formatters::blobs(format), nodes))
            }
            ViewKind::VaultExplorer => ActiveList::VaultItemKinds(loaded(
                formatters::vault_item_kinds(),
                VaultItemKind::ALL.to_vec(),
            )),
            ViewKind::VaultSecrets => {
                let url = required(ctx.vault_url.as_ref())?;
                let mut secrets = self
                    .provider
                    .list_secrets(url)
                    .await
                    .map_err(|e| CoreError::fetch("list secrets", e))?;
                if !self.config.show_disabled_items {
                    secrets.retain(|s| s.attributes.enabled);
                }
                ActiveList::Secrets(loaded(formatters::secrets(format), secrets))
            }
            ViewKind::VaultKeys => {
                let url = required(ctx.vault_url.as_ref())?;
                let mut keys = self
                    .provider
                    .list_vault_keys(url)
                    .await
                    .map_err(|e| CoreError::fetch("list keys", e))?;
                if !self.config.show_disabled_items {
                    keys.retain(|k| k.attributes.enabled);
                }
                ActiveList::Keys(loaded(formatters::vault_keys(format), keys))
            }
            ViewKind::VaultCertificates => {
                let url = required(ctx.vault_url.as_ref())?;
                let mut certificates = self
                    .provider
                    .list_certificates(url)
                    .await
                    .map_err(|e| CoreError::fetch("list certificates", e))?;
                if !self.config.show_disabled_items {
                    certificates.retain(|c| c.attributes.enabled);
                }
                ActiveList::Certificates(loaded(
                    formatters::certificates(format, Utc::now()),
                    certificates,
                ))
            }
            ViewKind::Menu => {
                let entries = self
                    .registry
                    .supported_types()
                    .into_iter()
                    .map(|resource_type| MenuEntry {
                        display_name: type_display_name(&self.registry, &resource_type),
                        resource_type,
                    })
                    .collect();
                ActiveList::Menu(loaded(formatters::menu(), entries))
            }
        };
        Ok(list)
    }
}
