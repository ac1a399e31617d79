//! Global context for parsing and rendering

use crate::namespace::KeyMap;
use crate::siunitx::UnitTables;
use crate::{
    define_function::{FunctionDefSpec, FunctionSpec, MathMLBuilder},
    functions,
    parser::parse_node::NodeType,
    symbols::{Symbols, create_symbols},
};

/// The registry of everything a render can look up.
///
/// A context holds the functions, the MathML builder of every node type,
/// the symbol table and the unit tables. It is built once and then only
/// read, so one context can serve any number of renders.
pub struct KatexContext {
    /// All registered functions, keyed by their control sequence.
    /// `Parser` requires this dictionary
    pub functions: KeyMap<String, FunctionSpec>,
    /// MathML builders. Should be only used in the `define*` and the
    /// `build_mathml` functions.
    pub mathml_group_builders: KeyMap<NodeType, MathMLBuilder>,
    /// Main symbol table mapping modes to character information
    pub symbols: Symbols,
    /// Prefixes, units and abbreviations for `\si` and `\SI` fields
    pub units: UnitTables,
}

impl KatexContext {
    /// Registers a family of functions and the builder of their node type.
    pub fn define_function(&mut self, spec: FunctionDefSpec) {
        let data = FunctionSpec {
            node_type: spec.node_type,
            num_args: spec.props.num_args,
            arg_types: spec.props.arg_types,
            allowed_in_argument: spec.props.allowed_in_argument,
            allowed_in_text: spec.props.allowed_in_text,
            allowed_in_math: spec.props.allowed_in_math,
            num_optional_args: spec.props.num_optional_args,
            primitive: spec.props.primitive,
            handler: spec.handler,
        };

        for name in spec.names {
            self.functions.insert((*name).to_owned(), data.clone());
        }

        if let Some(node_type) = spec.node_type {
            self.define_function_builders(node_type, spec.mathml_builder);
        }
    }

    /// Register only the MathML builder for a node type
    pub fn define_function_builders(
        &mut self,
        node_type: NodeType,
        mathml_builder: Option<MathMLBuilder>,
    ) {
        if let Some(builder) = mathml_builder {
            self.mathml_group_builders.insert(node_type, builder);
        }
    }
}

impl Default for KatexContext {
    fn default() -> Self {
        let mut ctx = Self {
            functions: KeyMap::default(),
            mathml_group_builders: KeyMap::default(),
            symbols: create_symbols(),
            units: UnitTables::new(),
        };
        functions::define_relax(&mut ctx);
        functions::define_color(&mut ctx);
        functions::define_def(&mut ctx);
        functions::define_font(&mut ctx);
        functions::define_kern(&mut ctx);
        functions::define_ordgroup(&mut ctx);
        functions::define_spacing(&mut ctx);
        functions::define_supsub(&mut ctx);
        functions::define_symbols_op(&mut ctx);
        functions::define_symbols_ord(&mut ctx);
        functions::define_text(&mut ctx);
        functions::define_siunitx(&mut ctx);
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_node_types_have_builders() {
        let ctx = KatexContext::default();
        // Internal, color-token and size nodes never reach the builder.
        for node_type in [
            NodeType::Atom,
            NodeType::Color,
            NodeType::Font,
            NodeType::Kern,
            NodeType::MathOrd,
            NodeType::OrdGroup,
            NodeType::SiQuantity,
            NodeType::SiUnits,
            NodeType::Spacing,
            NodeType::SupSub,
            NodeType::Text,
            NodeType::TextOrd,
            NodeType::UnitRun,
        ] {
            assert!(
                ctx.mathml_group_builders.contains_key(&node_type),
                "{node_type} has no builder"
            );
        }
    }

    #[test]
    fn test_unit_vocabulary_is_not_a_function() {
        let ctx = KatexContext::default();
        assert!(ctx.functions.contains_key(r"\SI"));
        assert!(!ctx.functions.contains_key(r"\metre"));
        assert!(ctx.units.lookup_command(r"\metre").is_some());
    }
}
