//! Human-readable effect listing, used by `fxmlc --dump text`.

use crate::effect::model::Effect;
use crate::effect::parameter::{Annotation, Parameter};
use crate::effect::state::RenderState;
use crate::effect::technique::{Pass, Technique};
use std::fmt;

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {};", self.value_type, self.name, self.value)
    }
}

fn write_annotations(f: &mut fmt::Formatter<'_>, anns: &[Annotation]) -> fmt::Result {
    if anns.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    for a in anns {
        write!(f, "{a}")?;
    }
    f.write_str(">")
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value_type, self.name)?;
        if self.array_size != 0 {
            write!(f, "[{}]", self.array_size)?;
        }
        write_annotations(f, &self.annotations)?;
        if let Some(v) = &self.value {
            write!(f, " = {v}")?;
        }
        if !self.semantic.is_empty() {
            write!(f, " : {}", self.semantic)?;
        }
        f.write_str(";")
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {};", self.wire_name(), self.value)
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    pass {}", self.name)?;
        write_annotations(f, &self.annotations)?;
        writeln!(f)?;
        writeln!(f, "    {{")?;
        for s in &self.states {
            writeln!(f, "        {s}")?;
        }
        write!(f, "    }}")
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "technique {}", self.name)?;
        write_annotations(f, &self.annotations)?;
        writeln!(f, " // weight {}", self.weight)?;
        writeln!(f, "{{")?;
        for p in &self.passes {
            writeln!(f, "{p}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.parameters {
            writeln!(f, "{p}")?;
        }
        for g in &self.cbuffers {
            let names: Vec<&str> = g
                .members
                .iter()
                .filter_map(|&i| self.parameters.get(i as usize))
                .map(|p| p.name.as_str())
                .collect();
            writeln!(f, "// cbuffer {}: {}", g.name, names.join(", "))?;
        }
        for s in &self.shaders {
            writeln!(f, "{s}")?;
        }
        for t in &self.techniques {
            writeln!(f, "{t}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/display.rs"]
mod tests;
