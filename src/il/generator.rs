use std::io::{self, Write};

use log::{debug, warn};

use crate::{error::EmitError, listing::Position};

use super::{name_generator::*, quad::*};

/// Default number of slots in the quad store. Slot 0 is reserved.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Settings for a [`CodeGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of slots in the store, including the reserved slot 0.
    /// `None` lets the store grow without bound.
    pub capacity: Option<usize>,
}
impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            capacity: Some(DEFAULT_CAPACITY),
        }
    }
}

/// Emission state for one compilation unit: the quad store and the
/// temporary counter.
pub struct CodeGenerator {
    listing: QuadListing,
    name_generator: NameGenerator,
}
impl CodeGenerator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        let listing = match config.capacity {
            Some(capacity) => QuadListing::bounded(capacity),
            None => QuadListing::new(),
        };
        Self {
            listing,
            name_generator: NameGenerator::new(),
        }
    }

    /// Start a new compilation unit. Previously emitted quads are discarded,
    /// and both the emission cursor and the temporary counter return to 1.
    pub fn init(&mut self) {
        debug!("Discarding {} quads", self.listing.len());
        self.listing.clear();
        self.name_generator.reset();
    }

    /// The index the next emitted quad will occupy.
    pub fn next_index(&self) -> Position {
        self.listing.next_position()
    }

    /// Generate a new unique temporary name.
    pub fn new_temp(&mut self) -> Address {
        self.name_generator.next_temp()
    }

    /// Append a quad, returning the index it was written to.
    ///
    /// The quad is flattened to its four fields and classified again, so a
    /// typed quad carrying a reserved mnemonic is stored exactly as the same
    /// fields passed to [`CodeGenerator::emit_raw`] would be.
    pub fn emit(&mut self, quad: Quad) -> Result<Position, EmitError> {
        let quad = Quad::classify(quad.into_raw());
        match &quad {
            Quad::Raw(raw) => warn!("Emitting unclassified quad '{}'", raw),
            _ if quad.jump_target() == Some(Position::NONE) => {
                warn!("Emitting jump to reserved index 0: '{}'", quad)
            }
            _ => (),
        }

        debug!("Emitting {}: {}", self.next_index(), quad);
        self.listing.push(quad).map_err(EmitError::from)
    }

    /// Append a quad given as four optional fields. The fields are copied, so
    /// the caller keeps ownership of its buffers.
    pub fn emit_raw(
        &mut self,
        op: Option<&str>,
        arg1: Option<&str>,
        arg2: Option<&str>,
        res: Option<&str>,
    ) -> Result<Position, EmitError> {
        self.emit(Quad::Raw(RawQuad::new(op, arg1, arg2, res)))
    }

    pub fn listing(&self) -> &QuadListing {
        &self.listing
    }

    /// Write every quad as `<index>: <quad>`, one per line, in index order.
    pub fn render<W: Write>(&self, sink: W) -> io::Result<()> {
        self.render_with(sink, RenderStyle::default())
    }

    pub fn render_with<W: Write>(&self, mut sink: W, style: RenderStyle) -> io::Result<()> {
        for (position, quad) in self.listing.iter_lines() {
            writeln!(sink, "{}: {}", position, quad.display(style))?;
        }
        sink.flush()
    }
}
impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::il::opcode::{resolve, SemanticType};

    use super::*;

    fn rendered(cg: &CodeGenerator) -> Vec<String> {
        let mut out = Vec::new();
        cg.render(&mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn next_index_tracks_emissions() {
        let mut cg = CodeGenerator::new();

        for k in 1..=20 {
            assert_eq!(Position(k), cg.next_index());
            let written = cg.emit_raw(Some(":="), Some("1"), None, Some("x")).unwrap();
            assert_eq!(Position(k), written);
        }
        assert_eq!(20, cg.listing().len());
    }

    #[test]
    fn quads_are_kept_in_emission_order() {
        let mut cg = CodeGenerator::new();
        cg.emit(Quad::assign("a", "1")).unwrap();
        cg.emit(Quad::assign("b", "2")).unwrap();
        cg.emit(Quad::Halt).unwrap();

        assert_eq!(vec!["1: a := 1", "2: b := 2", "3: HALT"], rendered(&cg));
    }

    #[test]
    fn emit_raw_copies_fields() {
        let mut cg = CodeGenerator::new();
        let mut buffer = String::from("x");
        cg.emit_raw(Some(":="), Some(buffer.as_str()), None, Some("y")).unwrap();
        buffer.push_str("yz");

        assert_eq!(Some(&Quad::assign("y", "x")), cg.listing().get(Position(1)));
    }

    #[test]
    fn emitting_past_capacity_is_an_error() {
        let mut cg = CodeGenerator::with_config(GeneratorConfig { capacity: Some(4) });
        for _ in 0..3 {
            cg.emit(Quad::Halt).unwrap();
        }

        assert_eq!(
            Err(EmitError::CapacityExceeded { capacity: 4 }),
            cg.emit(Quad::Halt)
        );
        assert_eq!(3, cg.listing().len());
        assert_eq!(Position(4), cg.next_index());
    }

    #[test]
    fn default_store_holds_999_quads() {
        let mut cg = CodeGenerator::new();
        for _ in 0..999 {
            cg.emit(Quad::Halt).unwrap();
        }

        assert!(cg.emit(Quad::Halt).is_err());
        assert_eq!(999, cg.listing().len());
    }

    #[test]
    fn unbounded_store_grows() {
        let mut cg = CodeGenerator::with_config(GeneratorConfig { capacity: None });
        for _ in 0..2000 {
            cg.emit(Quad::Halt).unwrap();
        }

        assert_eq!(Position(2001), cg.next_index());
    }

    #[test]
    fn init_resets_cursor_and_temps() {
        let mut cg = CodeGenerator::new();
        cg.new_temp();
        cg.emit(Quad::Halt).unwrap();
        cg.init();

        assert_eq!(Position(1), cg.next_index());
        assert_eq!("$t01", cg.new_temp().to_string());
        assert!(rendered(&cg).is_empty());
    }

    #[test]
    fn generators_are_independent() {
        let mut first = CodeGenerator::new();
        let mut second = CodeGenerator::new();
        first.new_temp();
        first.emit(Quad::Halt).unwrap();

        assert_eq!("$t01", second.new_temp().to_string());
        assert_eq!(Position(1), second.next_index());
    }

    #[test]
    fn binary_op_at_index_three() {
        let mut cg = CodeGenerator::new();
        cg.emit(Quad::assign("x", "1")).unwrap();
        cg.emit(Quad::assign("y", "2")).unwrap();
        cg.emit_raw(Some("ADDI"), Some("$t01"), Some("x"), Some("$t02"))
            .unwrap();

        assert_eq!("3: $t02 := $t01 ADDI x", rendered(&cg)[2]);
    }

    #[test]
    fn loop_targets_match_captured_indices() {
        let mut cg = CodeGenerator::new();
        cg.init();

        let loop_start = cg.next_index();
        let cond = cg.new_temp();
        cg.emit(Quad::bin(
            cond.clone(),
            resolve("LT", SemanticType::Integer),
            "i",
            "10",
        ))
        .unwrap();
        // The exit target is unknown yet; the branch skips the jump out.
        let body_start = cg.next_index() + 2;
        cg.emit(Quad::if_goto("IFNEI", cond, "0", body_start))
            .unwrap();
        let exit_jump = cg.next_index();
        assert_eq!(Position(3), exit_jump);
        let exit_target = exit_jump + 4;
        cg.emit(Quad::goto(exit_target)).unwrap();

        assert_eq!(body_start, cg.next_index());
        let step = cg.new_temp();
        cg.emit(Quad::bin(step.clone(), "ADDI", "i", "1")).unwrap();
        cg.emit(Quad::assign("i", step)).unwrap();
        cg.emit(Quad::goto(loop_start)).unwrap();
        assert_eq!(exit_target, cg.next_index());
        cg.emit(Quad::Halt).unwrap();

        assert_eq!(
            vec![
                "1: $t01 := i LTI 10",
                "2: IFNEI $t01 0 GOTO 4",
                "3: GOTO 7",
                "4: $t02 := i ADDI 1",
                "5: i := $t02",
                "6: GOTO 1",
                "7: HALT",
            ],
            rendered(&cg)
        );
        for (_, quad) in cg.listing().iter_lines() {
            if let Some(target) = quad.jump_target() {
                assert!(cg.listing().get(target).is_some());
            }
        }
    }

    #[test]
    fn typed_and_raw_emission_render_alike() {
        let mut typed = CodeGenerator::new();
        typed
            .emit(Quad::Raw(RawQuad::new(Some("GOTO"), None, None, Some("4"))))
            .unwrap();
        typed.emit(Quad::bin("x", ":=", "a", "b")).unwrap();
        typed.emit(Quad::unary("t", "HALT", "a")).unwrap();
        typed.emit(Quad::bin("c", "PARAM", "a", "b")).unwrap();
        typed.emit(Quad::unary("9", "GOTO", "a")).unwrap();
        typed.emit(Quad::bin("t", "IFEQI", "a", "b")).unwrap();

        let mut raw = CodeGenerator::new();
        raw.emit_raw(Some("GOTO"), None, None, Some("4")).unwrap();
        raw.emit_raw(Some(":="), Some("a"), Some("b"), Some("x"))
            .unwrap();
        raw.emit_raw(Some("HALT"), Some("a"), None, Some("t"))
            .unwrap();
        raw.emit_raw(Some("PARAM"), Some("a"), Some("b"), Some("c"))
            .unwrap();
        raw.emit_raw(Some("GOTO"), Some("a"), None, Some("9"))
            .unwrap();
        raw.emit_raw(Some("IFEQI"), Some("a"), Some("b"), Some("t"))
            .unwrap();

        let expected = vec![
            "1: GOTO 4",
            "2: x := a",
            "3: HALT",
            "4: PARAM a",
            "5: GOTO 9",
            "6: IFEQI a b GOTO t",
        ];
        assert_eq!(expected, rendered(&typed));
        assert_eq!(expected, rendered(&raw));
    }

    #[test]
    fn typed_quads_are_stored_classified() {
        let mut cg = CodeGenerator::new();
        let position = cg.emit(Quad::bin("x", ":=", "a", "b")).unwrap();

        assert_eq!(Some(&Quad::assign("x", "a")), cg.listing().get(position));
    }

    #[test]
    fn split_branch_style() {
        let mut cg = CodeGenerator::new();
        cg.emit(Quad::if_goto("IFGEF", "a", "b", Position(1))).unwrap();
        let mut out = Vec::new();
        cg.render_with(&mut out, RenderStyle::SplitBranches).unwrap();

        assert_eq!("1: IF a GEF b GOTO 1\n", String::from_utf8(out).unwrap());
    }
}
