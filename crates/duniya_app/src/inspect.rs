//! Human- and machine-readable scene summaries for `scene_tool inspect`.

use std::fmt;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use duniya_component::{
    Camera, ComponentKind, EntityTable, ErasedComponent, Material, Mesh, Texture, Transform,
    TypeRegistry, WireTag,
};

#[derive(Debug, Serialize)]
pub struct SceneSummary {
    pub registry: Vec<RegistryLine>,
    pub entity_count: usize,
    pub component_count: usize,
    pub entities: Vec<EntitySummary>,
}

#[derive(Debug, Serialize)]
pub struct RegistryLine {
    pub name: String,
    pub tag: WireTag,
}

#[derive(Debug, Serialize)]
pub struct EntitySummary {
    pub id: u32,
    pub components: Vec<ComponentSummary>,
}

#[derive(Debug, Serialize)]
pub struct ComponentSummary {
    pub kind: ComponentKind,
    pub value: Value,
}

fn component_value(component: &ErasedComponent) -> Result<Value> {
    let value = match component.kind() {
        ComponentKind::Transform => serde_json::to_value(component.downcast_ref::<Transform>()?)?,
        ComponentKind::Mesh => serde_json::to_value(component.downcast_ref::<Mesh>()?)?,
        ComponentKind::Texture => serde_json::to_value(component.downcast_ref::<Texture>()?)?,
        ComponentKind::Material => serde_json::to_value(component.downcast_ref::<Material>()?)?,
        ComponentKind::Camera => serde_json::to_value(component.downcast_ref::<Camera>()?)?,
    };
    Ok(value)
}

/// Build a summary of `table` as described by `registry`.
pub fn summarize(table: &EntityTable, registry: &TypeRegistry) -> Result<SceneSummary> {
    let entities = table
        .iter()
        .map(|(id, array)| {
            let components = array
                .iter()
                .map(|component| {
                    Ok(ComponentSummary {
                        kind: component.kind(),
                        value: component_value(component)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(EntitySummary {
                id: id.id(),
                components,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SceneSummary {
        registry: registry
            .iter()
            .map(|entry| RegistryLine {
                name: entry.name.clone(),
                tag: entry.tag,
            })
            .collect(),
        entity_count: table.len(),
        component_count: table.component_count(),
        entities,
    })
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "registry:")?;
        for line in &self.registry {
            writeln!(f, "  {:#06x}  {}", line.tag, line.name)?;
        }
        writeln!(
            f,
            "{} entities, {} components",
            self.entity_count, self.component_count
        )?;
        for entity in &self.entities {
            if entity.components.is_empty() {
                writeln!(f, "  Entity({}): <empty>", entity.id)?;
                continue;
            }
            writeln!(f, "  Entity({}):", entity.id)?;
            for component in &entity.components {
                writeln!(f, "    {}: {}", component.kind, component.value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn test_summary_counts() {
        let table = demo::build_scene().unwrap();
        let summary = summarize(&table, &TypeRegistry::builtin()).unwrap();
        assert_eq!(summary.entity_count, 3);
        assert_eq!(summary.component_count, 6);
        assert_eq!(summary.registry.len(), ComponentKind::ALL.len());
        assert_eq!(summary.entities[1].components[0].kind, ComponentKind::Texture);
        assert_eq!(summary.entities[1].components[0].value["width"], 64);
    }

    #[test]
    fn test_summary_text_marks_empty_entities() {
        let mut table = demo::build_scene().unwrap();
        table.despawn(duniya_component::EntityId(0)).unwrap();
        let text = summarize(&table, &TypeRegistry::builtin())
            .unwrap()
            .to_string();
        assert!(text.contains("Entity(0): <empty>"));
        assert!(text.contains("0x0003  Texture"));
    }

    #[test]
    fn test_summary_json_has_kind_names() {
        let table = demo::build_scene().unwrap();
        let summary = summarize(&table, &TypeRegistry::builtin()).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["entities"][2]["components"][1]["kind"], "Mesh");
    }
}
