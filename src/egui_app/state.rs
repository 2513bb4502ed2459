#![cfg(feature = "egui")]

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use eframe::egui::{self, Vec2};
use indexmap::IndexMap;
use log::warn;

use crate::content::{
    ChemicalImage, ChemicalImageLoader, ContentService, ContentServiceError, PathwayOccurrence,
    RawResource, RequestSlot, UploadResponse,
};
use crate::events::EventBus;
use crate::model::{Diagram, HoveredItem, NodeKind};
use crate::search::{FacetCount, FacetSelection, SearchArguments};

/// How often the live interactor resource list is refreshed.
pub(crate) const RESOURCES_REFRESH: Duration = Duration::from_secs(600);
/// Form value of the built-in static resource.
pub(crate) const STATIC_RESOURCE: &str = "static";

/// Which input mode of the insert dialog is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTab {
    Url,
    File,
    Content,
}

/// State of the popup for adding a custom interactor resource.
pub struct InsertDialog {
    pub open: bool,
    pub tab: InsertTab,
    pub name: String,
    pub url: String,
    pub file_path: String,
    pub content: String,
    /// Inline validation or submission error.
    pub error: Option<String>,
    pub warnings: Vec<String>,
    pub submitted_token: Option<String>,
    pub slot: RequestSlot<Result<UploadResponse, ContentServiceError>>,
}

impl InsertDialog {
    pub fn new() -> Self {
        Self {
            open: true,
            tab: InsertTab::Url,
            name: String::new(),
            url: String::new(),
            file_path: String::new(),
            content: String::new(),
            error: None,
            warnings: Vec::new(),
            submitted_token: None,
            slot: RequestSlot::new(),
        }
    }
}

impl Default for InsertDialog {
    fn default() -> Self {
        Self::new()
    }
}

/// Interactor settings-tab state: resource list, current selection, refresh
/// bookkeeping.
pub struct InteractorsTab {
    pub resources: Vec<RawResource>,
    /// Form value of the selected resource ("static" or a PSICQUIC name).
    pub selected: String,
    pub loading: bool,
    pub error: Option<String>,
    pub slot: RequestSlot<Result<Vec<RawResource>, ContentServiceError>>,
    pub last_refresh: Option<Instant>,
}

impl InteractorsTab {
    fn new() -> Self {
        Self {
            resources: Vec::new(),
            selected: STATIC_RESOURCE.to_owned(),
            loading: false,
            error: None,
            slot: RequestSlot::new(),
            last_refresh: None,
        }
    }
}

/// One row of the search result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub node_id: u64,
    pub display_name: String,
    pub st_id: Option<String>,
    /// Facet this result is categorized under (the node kind name).
    pub facet: String,
}

/// Search panel state: the raw query plus everything derived from it.
pub struct SearchPanel {
    pub query: String,
    pub species: String,
    pub arguments: Option<SearchArguments>,
    pub facets: FacetSelection,
    pub results: Vec<SearchResult>,
}

/// Pathway-occurrences popup for a clicked interactor.
pub struct OccurrencesPopup {
    pub open: bool,
    pub molecule: String,
    pub pathways: Vec<PathwayOccurrence>,
    pub error: Option<String>,
    pub slot: RequestSlot<Result<Vec<PathwayOccurrence>, ContentServiceError>>,
}

impl OccurrencesPopup {
    fn new(molecule: String) -> Self {
        Self {
            open: true,
            molecule,
            pathways: Vec::new(),
            error: None,
            slot: RequestSlot::new(),
        }
    }
}

/// Interactive viewer application for one loaded pathway diagram.
pub struct ViewerApp {
    pub diagram: Diagram,
    pub bus: EventBus,
    pub content: ContentService,
    pub chemicals: ChemicalImageLoader,
    pub zoom: f32,
    pub pan: Vec2,
    pub reset_view: bool,
    pub hovered: Option<HoveredItem>,
    pub selected: Option<u64>,
    pub search: SearchPanel,
    pub interactors: InteractorsTab,
    pub insert_dialog: Option<InsertDialog>,
    pub occurrences: Option<OccurrencesPopup>,
    pub structure: Option<ChemicalImage>,
    pub chemical_slot: RequestSlot<Result<ChemicalImage, ContentServiceError>>,
}

impl ViewerApp {
    pub fn new(diagram: Diagram, content: ContentService) -> Self {
        let bus = EventBus::new();
        let chemicals = ChemicalImageLoader::new(bus.clone());
        let facets = FacetSelection::new(bus.clone());
        Self {
            diagram,
            bus,
            content,
            chemicals,
            zoom: 1.0,
            pan: Vec2::ZERO,
            reset_view: true,
            hovered: None,
            selected: None,
            search: SearchPanel {
                query: String::new(),
                species: "Homo sapiens".to_owned(),
                arguments: None,
                facets,
                results: Vec::new(),
            },
            interactors: InteractorsTab::new(),
            insert_dialog: None,
            occurrences: None,
            structure: None,
            chemical_slot: RequestSlot::new(),
        }
    }

    /// Rebuild the search arguments and the result/facet lists from the
    /// current query. The previous facet selection survives by name
    /// intersection.
    pub fn run_search(&mut self) {
        let previous = self.search.facets.selected_facets();
        let arguments = SearchArguments::new(
            &self.search.query,
            &self.diagram.st_id,
            &self.search.species,
            previous.clone(),
        );
        self.search.results.clear();
        if arguments.has_valid_query() {
            let mut counts: IndexMap<String, u64> = IndexMap::new();
            for node in &self.diagram.nodes {
                if arguments.matches(&node.display_name) {
                    let facet = node.kind.name().to_owned();
                    *counts.entry(facet.clone()).or_insert(0) += 1;
                    self.search.results.push(SearchResult {
                        node_id: node.id,
                        display_name: node.display_name.clone(),
                        st_id: node.st_id.clone(),
                        facet,
                    });
                }
            }
            let facet_counts: Vec<FacetCount> = counts
                .into_iter()
                .map(|(name, count)| FacetCount { name, count })
                .collect();
            self.search.facets.set_facets(&facet_counts, &previous);
        } else {
            self.search.facets.set_facets(&[], &BTreeSet::new());
        }
        self.search.arguments = Some(arguments);
    }

    /// Kick off (or re-kick) the periodic resource refresh.
    pub fn refresh_resources_if_due(&mut self) {
        let due = match self.interactors.last_refresh {
            None => true,
            Some(at) => at.elapsed() >= RESOURCES_REFRESH,
        };
        if due && !self.interactors.slot.is_pending() {
            self.interactors.loading = true;
            self.interactors.last_refresh = Some(Instant::now());
            let service = self.content.clone();
            self.interactors.slot.spawn(move || service.psicquic_resources());
        }
    }

    /// Open the occurrences popup for `molecule` and start the lookup,
    /// superseding any previous one. Chemicals additionally fetch their
    /// structure depiction.
    pub fn query_occurrences(&mut self, molecule: String, kind: NodeKind) {
        let species = self.search.species.clone();
        let service = self.content.clone();
        let popup = self
            .occurrences
            .get_or_insert_with(|| OccurrencesPopup::new(molecule.clone()));
        popup.open = true;
        popup.molecule = molecule.clone();
        popup.pathways.clear();
        popup.error = None;
        let query = molecule.clone();
        popup
            .slot
            .spawn(move || service.interactor_occurrences(&query, &species));

        if kind == NodeKind::Chemical {
            self.structure = None;
            let loader = self.chemicals.clone();
            self.chemical_slot.spawn(move || loader.load(&molecule));
        }
    }

    /// Drain finished background requests into the UI state.
    pub fn poll_network(&mut self) {
        if let Some(result) = self.interactors.slot.poll() {
            self.interactors.loading = false;
            match result {
                Ok(resources) => {
                    self.interactors.resources = resources;
                    self.interactors.error = None;
                }
                Err(e) => {
                    warn!("resource refresh failed: {e}");
                    self.interactors.error = Some(e.to_string());
                }
            }
        }
        if let Some(popup) = &mut self.occurrences {
            if let Some(result) = popup.slot.poll() {
                match result {
                    Ok(pathways) => {
                        popup.pathways = pathways;
                        popup.error = None;
                    }
                    Err(e) => popup.error = Some(e.to_string()),
                }
            }
        }
        if let Some(dialog) = &mut self.insert_dialog {
            if let Some(result) = dialog.slot.poll() {
                match result {
                    Ok(response) if response.is_success() => {
                        dialog.submitted_token = response.summary.map(|s| s.token);
                        dialog.warnings = response.warning_messages;
                        dialog.error = None;
                    }
                    Ok(response) => {
                        dialog.error = Some(response.error_messages.join("; "));
                        dialog.warnings = response.warning_messages;
                    }
                    Err(e) => dialog.error = Some(e.to_string()),
                }
            }
        }
        if let Some(result) = self.chemical_slot.poll() {
            match result {
                Ok(image) => self.structure = Some(image),
                Err(e) => warn!("structure image load failed: {e}"),
            }
        }
    }

    /// Whether any background request is still in flight.
    pub fn any_pending(&self) -> bool {
        self.interactors.slot.is_pending()
            || self.chemical_slot.is_pending()
            || self
                .occurrences
                .as_ref()
                .is_some_and(|p| p.slot.is_pending())
            || self
                .insert_dialog
                .as_ref()
                .is_some_and(|d| d.slot.is_pending())
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::update(self, ctx);
    }
}
