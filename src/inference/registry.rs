use indexmap::IndexMap;

/// Uniqueness pass for generated type names in a flat namespace.
///
/// Remembers the first shape seen under each name. A later claim with the same
/// shape reuses the declaration; a different shape gets a numeric suffix
/// (`User`, `User2`, `User3`, ...).
#[derive(Debug, Default)]
pub struct TypeRegistry {
    shapes: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub name: String,
    /// false when an identical shape already owns `name`
    pub fresh: bool,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: &str, shape: &str) -> Claim {
        let mut attempt = 1usize;
        loop {
            let name = if attempt == 1 {
                base.to_string()
            } else {
                format!("{base}{attempt}")
            };
            match self.shapes.get(&name) {
                None => {
                    self.shapes.insert(name.clone(), shape.to_string());
                    return Claim { name, fresh: true };
                }
                Some(existing) if existing == shape => {
                    return Claim { name, fresh: false };
                }
                Some(_) => attempt += 1,
            }
        }
    }
}
