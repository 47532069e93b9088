// src/cli/types.rs
use translated_tabletext::attribute::AttributeTypeRegistry;
use translated_tabletext::store::StoreResult;

pub fn run(registry: &AttributeTypeRegistry) -> StoreResult<()> {
    println!("{:<24} {}", "Type", "Icon");
    println!("{}", "-".repeat(80));
    for name in registry.type_names() {
        if let Some(info) = registry.get(name) {
            println!("{:<24} {}", info.type_name, info.type_icon);
        }
    }
    Ok(())
}
