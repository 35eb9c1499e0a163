use anyhow::{anyhow, Context, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run a jq filter over `input` and collect every output as JSON.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| anyhow!("{e:?}"))?;
        // Val's Display is JSON text
        let json = serde_json::from_str::<Value>(&val.to_string())
            .with_context(|| format!("jq produced a value that is not JSON: {val}"))?;
        out.push(json);
    }
    Ok(out)
}

/// Like [`run_jaq`], but the filter has to select exactly one document.
pub fn run_jaq_single(filter_src: &str, input: &Value) -> Result<Value> {
    let mut outputs = run_jaq(filter_src, input)?;
    match outputs.len() {
        1 => Ok(outputs.remove(0)),
        0 => Err(anyhow!("`{filter_src}` produced no output")),
        n => Err(anyhow!("`{filter_src}` produced {n} outputs, expected exactly one")),
    }
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> anyhow::Error {
    let lines: Vec<String> = errs
        .into_iter()
        .map(|(file, err)| format!("cannot parse `{}`: {err:?}", file.code))
        .collect();
    anyhow!(lines.join("\n"))
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> anyhow::Error {
    let lines: Vec<String> = errs
        .into_iter()
        .flat_map(|(file, list)| {
            list.into_iter()
                .map(move |(name, undef)| format!("undefined `{name}` ({undef:?}) in `{}`", file.code))
        })
        .collect();
    anyhow!(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selects_a_subdocument() {
        let doc = json!({"data": {"user": {"id": 1}}});
        assert_eq!(run_jaq_single(".data.user", &doc).unwrap(), json!({"id": 1}));
    }

    #[test]
    fn multiple_outputs_are_rejected_for_single() {
        let doc = json!({"items": [{"a": 1}, {"a": 2}]});
        assert_eq!(run_jaq(".items[]", &doc).unwrap().len(), 2);
        assert!(run_jaq_single(".items[]", &doc).is_err());
    }

    #[test]
    fn parse_errors_surface() {
        assert!(run_jaq(".[", &json!({})).is_err());
    }
}
