use super::{SelectItem, SelectItems};
use crate::config::BuilderConfig;
use crate::graph_catalog::EntityDef;
use crate::query_planner::query::{AttributeSelection, Query};

/// Requested attributes, then the synthetic identifier column, then one
/// synthetic foreign-key column per referenced entity that is also selected.
pub fn build_select_items(
    config: &BuilderConfig,
    entity: &str,
    def: &EntityDef,
    attributes: &AttributeSelection,
    query: &Query,
) -> SelectItems {
    let item = |column: String| SelectItem {
        entity: entity.to_string(),
        column,
    };

    let mut items: Vec<SelectItem> = attributes.iter().map(|attr| item(attr.to_string())).collect();
    items.push(item(config.identifier_column.clone()));
    items.extend(
        def.references
            .keys()
            .filter(|referenced| query.is_selected(referenced))
            .map(|referenced| item(config.reference_column(referenced))),
    );
    SelectItems(items)
}
