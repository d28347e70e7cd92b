//! Search box and course information panel shown over the canvas.
//!
//! Both only read and write signals; clicks and hovers are posted as
//! [`PanelAction`]s for the canvas component to apply to the graph state.

use leptos::prelude::*;

use super::graph::NodeIdx;
use super::panel::InfoPanel;
use super::search::SearchHit;

/// Requests from the overlay to the graph view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
	/// Select a course as if it had been clicked on the canvas.
	Select(NodeIdx),
	/// Outline a course on the canvas, or remove the outline.
	Hover(Option<NodeIdx>),
}

/// Search-as-you-type box with up to `search_limit` results.
#[component]
pub fn SearchBox(
	query: RwSignal<String>,
	hits: RwSignal<Vec<SearchHit>>,
	action: RwSignal<Option<PanelAction>>,
) -> impl IntoView {
	view! {
		<div class="searchbox">
			<input
				type="text"
				placeholder="Search a course"
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>
			<div class="search_results_container" class:empty=move || hits.with(Vec::is_empty)>
				<For
					each=move || hits.get()
					key=|hit| hit.node
					children=move |hit: SearchHit| {
						let node = hit.node;
						view! {
							<div
								class="search_results_cell"
								on:click=move |_| {
									query.set(String::new());
									action.set(Some(PanelAction::Select(node)));
								}
							>
								{hit.title}
							</div>
						}
					}
				/>
			</div>
		</div>
	}
}

/// Title, description, sections and related courses of the selection.
#[component]
pub fn InfoPanelContent(
	panel: RwSignal<Option<InfoPanel>>,
	action: RwSignal<Option<PanelAction>>,
) -> impl IntoView {
	move || {
		panel.get().map(|info| {
			let sections = (!info.sections.is_empty()).then(|| {
				view! {
					<div class="sections">
						<strong>"This course is taught to:"</strong>
						{info
							.sections
							.iter()
							.map(|section| view! { <div>{section.clone()}</div> })
							.collect_view()}
					</div>
				}
			});

			let related = (!info.related.is_empty()).then(|| {
				view! {
					<div class="related">
						<div class="related_title">"Related courses:"</div>
						{info
							.related
							.iter()
							.map(|course| {
								let node = course.node;
								view! {
									<span
										class="related_course"
										on:click=move |_| action.set(Some(PanelAction::Select(node)))
										on:mouseenter=move |_| {
											action.set(Some(PanelAction::Hover(Some(node))))
										}
										on:mouseleave=move |_| action.set(Some(PanelAction::Hover(None)))
									>
										{course.title.clone()}
									</span>
								}
							})
							.collect_view()}
					</div>
				}
			});

			view! {
				<div class="title">
					<strong>{info.title.clone()}</strong>
				</div>
				<div class="description">{info.description.clone().unwrap_or_default()}</div>
				{sections}
				{related}
			}
		})
	}
}
