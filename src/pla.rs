//! PLA (Programmable Logic Array) format support
//!
//! Berkeley PLA text: `.i`/`.o` dimensions, optional `.ilb`/`.ob` labels,
//! a `.type` directive selecting which sets the body describes, one cube
//! per line with `0 1 - ?` input characters, and `.e`/`.end` at the end.
//! Reading and writing are exposed as the [`PLAReader`] and [`PLAWriter`]
//! traits so any cover-shaped type can opt in through the internal
//! serialization trait. Format defects are reported with the line they
//! were found on; writing can only fail on IO.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use crate::cover::{Cover, CoverType, Cube, CubeType};
use crate::error::{PLAError, PLAReadError};

/// Internal trait for types that serialize to and from PLA format.
///
/// Provides the accessors the blanket [`PLAReader`]/[`PLAWriter`] impls
/// need; [`Cover`] is the only implementor today.
pub(crate) trait PLASerialisable: Sized {
    fn num_inputs(&self) -> usize;
    fn num_outputs(&self) -> usize;
    fn internal_cubes(&self) -> &[Cube];
    fn get_input_labels(&self) -> Option<&[Arc<str>]>;
    fn get_output_labels(&self) -> Option<&[Arc<str>]>;
    fn create_from_pla_parts(
        num_inputs: usize,
        num_outputs: usize,
        input_labels: Vec<Arc<str>>,
        output_labels: Vec<Arc<str>>,
        cubes: Vec<Cube>,
        cover_type: CoverType,
    ) -> Self;
}

impl PLASerialisable for Cover {
    fn num_inputs(&self) -> usize {
        self.num_inputs()
    }

    fn num_outputs(&self) -> usize {
        self.num_outputs()
    }

    fn internal_cubes(&self) -> &[Cube] {
        self.raw_cubes()
    }

    fn get_input_labels(&self) -> Option<&[Arc<str>]> {
        if self.input_labels().is_empty() {
            None
        } else {
            Some(self.input_labels())
        }
    }

    fn get_output_labels(&self) -> Option<&[Arc<str>]> {
        if self.output_labels().is_empty() {
            None
        } else {
            Some(self.output_labels())
        }
    }

    fn create_from_pla_parts(
        num_inputs: usize,
        num_outputs: usize,
        input_labels: Vec<Arc<str>>,
        output_labels: Vec<Arc<str>>,
        cubes: Vec<Cube>,
        cover_type: CoverType,
    ) -> Self {
        Cover::from_pla_parts(
            num_inputs,
            num_outputs,
            input_labels,
            output_labels,
            cubes,
            cover_type,
        )
    }
}

/// Serialize a cover to PLA format.
pub trait PLAWriter {
    /// Write this cover in PLA format.
    ///
    /// `to_pla_string` and `to_pla_file` delegate here.
    fn write_pla<W: Write>(&self, writer: &mut W, pla_type: CoverType) -> io::Result<()>;

    /// Convert this cover to a PLA format string.
    fn to_pla_string(&self, pla_type: CoverType) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_pla(&mut buffer, pla_type)?;
        // PLA format is ASCII, so this conversion is safe
        Ok(String::from_utf8(buffer).unwrap())
    }

    /// Write this cover to a PLA file.
    fn to_pla_file<P: AsRef<Path>>(&self, path: P, pla_type: CoverType) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pla(&mut writer, pla_type)?;
        writer.flush()
    }
}

impl<T: PLASerialisable> PLAWriter for T {
    fn write_pla<W: Write>(&self, writer: &mut W, pla_type: CoverType) -> io::Result<()> {
        // .type comes first for FD, FR, FDR; plain F is the default
        match pla_type {
            CoverType::FD => writeln!(writer, ".type fd")?,
            CoverType::FR => writeln!(writer, ".type fr")?,
            CoverType::FDR => writeln!(writer, ".type fdr")?,
            CoverType::F => {}
        }

        writeln!(writer, ".i {}", self.num_inputs())?;
        if let Some(labels) = self.get_input_labels() {
            write!(writer, ".ilb")?;
            for label in labels {
                write!(writer, " {}", label)?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, ".o {}", self.num_outputs())?;
        if let Some(labels) = self.get_output_labels() {
            write!(writer, ".ob")?;
            for label in labels {
                write!(writer, " {}", label)?;
            }
            writeln!(writer)?;
        }

        let filtered_cubes: Vec<&Cube> = self
            .internal_cubes()
            .iter()
            .filter(|cube| match pla_type {
                CoverType::F => cube.cube_type() == CubeType::F,
                CoverType::FD => {
                    cube.cube_type() == CubeType::F || cube.cube_type() == CubeType::D
                }
                CoverType::FR => {
                    cube.cube_type() == CubeType::F || cube.cube_type() == CubeType::R
                }
                CoverType::FDR => true,
            })
            .collect();

        writeln!(writer, ".p {}", filtered_cubes.len())?;

        for cube in filtered_cubes {
            for inp in cube.inputs() {
                write!(
                    writer,
                    "{}",
                    match inp {
                        Some(false) => '0',
                        Some(true) => '1',
                        None => '-',
                    }
                )?;
            }
            write!(writer, " ")?;

            match pla_type {
                CoverType::F => {
                    for &out in cube.outputs() {
                        write!(writer, "{}", if out { '1' } else { '0' })?;
                    }
                }
                CoverType::FD | CoverType::FDR | CoverType::FR => {
                    // a set bit prints the set's character, an unset bit
                    // prints '~' (not covered by this cube)
                    let set_char = match cube.cube_type() {
                        CubeType::F => '1',
                        CubeType::D => '2',
                        CubeType::R => '0',
                    };
                    for &out in cube.outputs() {
                        write!(writer, "{}", if out { set_char } else { '~' })?;
                    }
                }
            }
            writeln!(writer)?;
        }

        // ".e" for plain F, ".end" for the richer types
        match pla_type {
            CoverType::F => writeln!(writer, ".e")?,
            _ => writeln!(writer, ".end")?,
        }
        Ok(())
    }
}

/// Deserialize a cover from PLA format.
pub trait PLAReader: Sized {
    /// Parse a cover from a PLA format reader.
    ///
    /// `from_pla_string` and `from_pla_file` delegate here.
    fn from_pla_reader<R: io::BufRead>(reader: R) -> Result<Self, PLAReadError>;

    /// Parse a cover from a PLA format string.
    ///
    /// ```
    /// use espresso_min::{Cover, PLAReader};
    ///
    /// let pla = ".i 2\n.o 1\n.p 1\n01 1\n.e\n";
    /// let cover = Cover::from_pla_string(pla).unwrap();
    /// assert_eq!(cover.num_inputs(), 2);
    /// assert_eq!(cover.num_outputs(), 1);
    /// ```
    fn from_pla_string(s: &str) -> Result<Self, PLAReadError> {
        Self::from_pla_reader(io::Cursor::new(s.as_bytes()))
    }

    /// Load a cover from a PLA format file.
    fn from_pla_file<P: AsRef<Path>>(path: P) -> Result<Self, PLAReadError> {
        let file = File::open(path)?;
        Self::from_pla_reader(BufReader::new(file))
    }
}

impl<T: PLASerialisable> PLAReader for T {
    fn from_pla_reader<R: io::BufRead>(reader: R) -> Result<Self, PLAReadError> {
        let mut num_inputs: Option<usize> = None;
        let mut num_outputs: Option<usize> = None;
        let mut cubes = Vec::new();
        // FD is the classic default: '-' outputs become don't-care cubes
        let mut cover_type = CoverType::FD;
        let mut input_labels: Option<(Vec<Arc<str>>, usize)> = None;
        let mut output_labels: Option<(Vec<Arc<str>>, usize)> = None;
        let mut lineno = 0usize;

        for line in reader.lines() {
            let line = line?;
            lineno += 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('.') {
                let parts: Vec<&str> = line.split_whitespace().collect();
                match parts.first().copied() {
                    Some(".i") => {
                        num_inputs = Some(parse_dimension(".i", parts.get(1), lineno)?);
                    }
                    Some(".o") => {
                        num_outputs = Some(parse_dimension(".o", parts.get(1), lineno)?);
                    }
                    Some(".type") => {
                        cover_type = match parts.get(1).copied() {
                            Some("fd") => CoverType::FD,
                            Some("fr") => CoverType::FR,
                            Some("fdr") => CoverType::FDR,
                            _ => CoverType::F,
                        };
                    }
                    Some(".ilb") => {
                        let labels: Vec<Arc<str>> =
                            parts.iter().skip(1).map(|s| Arc::from(*s)).collect();
                        if !labels.is_empty() {
                            input_labels = Some((labels, lineno));
                        }
                    }
                    Some(".ob") => {
                        let labels: Vec<Arc<str>> =
                            parts.iter().skip(1).map(|s| Arc::from(*s)).collect();
                        if !labels.is_empty() {
                            output_labels = Some((labels, lineno));
                        }
                    }
                    Some(".e") | Some(".end") => break,
                    // .p is informational, unknown directives are ignored
                    _ => {}
                }
                continue;
            }

            // a cube line; column formatting may scatter spaces, so strip
            // them all and split at the declared input/output boundary
            let flat: String = line.chars().filter(|c| !c.is_whitespace()).collect();
            let (input_str, output_str) = match (num_inputs, num_outputs) {
                (Some(ni), Some(no)) => {
                    if flat.len() != ni + no {
                        return Err(PLAReadError::at(
                            lineno,
                            PLAError::WrongCubeWidth {
                                found: flat.len(),
                                want_inputs: ni,
                                want_outputs: no,
                            },
                        ));
                    }
                    let (i, o) = flat.split_at(ni);
                    (i.to_string(), o.to_string())
                }
                _ => {
                    // dimensions not declared: infer from whitespace split
                    let parts: Vec<&str> = line.split_whitespace().collect();
                    if parts.len() < 2 {
                        return Err(PLAReadError::at(lineno, PLAError::UnknownDimensions));
                    }
                    (parts[0].to_string(), parts[1].to_string())
                }
            };

            let ni = *num_inputs.get_or_insert(input_str.len());
            let no = *num_outputs.get_or_insert(output_str.len());
            if input_str.len() != ni || output_str.len() != no {
                return Err(PLAReadError::at(
                    lineno,
                    PLAError::WrongCubeWidth {
                        found: input_str.len() + output_str.len(),
                        want_inputs: ni,
                        want_outputs: no,
                    },
                ));
            }

            let mut inputs = Vec::with_capacity(ni);
            for (column, ch) in input_str.chars().enumerate() {
                inputs.push(match ch {
                    '0' => Some(false),
                    '1' => Some(true),
                    '-' | '~' | '?' | 'x' | 'X' => None,
                    character => {
                        return Err(PLAReadError::at(
                            lineno,
                            PLAError::BadInputCharacter { character, column },
                        ))
                    }
                });
            }

            // one text line fans out into up to three cubes, following the
            // classic output conventions: 1/4 -> F, 0/3 -> R, -/2 -> D,
            // '~' -> nothing
            let mut f_outputs = Vec::with_capacity(no);
            let mut d_outputs = Vec::with_capacity(no);
            let mut r_outputs = Vec::with_capacity(no);
            let mut has_f = false;
            let mut has_d = false;
            let mut has_r = false;
            for (column, ch) in output_str.chars().enumerate() {
                let (f, d, r) = match ch {
                    '1' | '4' if cover_type.has_f() => (true, false, false),
                    '0' | '3' if cover_type.has_r() => (false, false, true),
                    '-' | '2' if cover_type.has_d() => (false, true, false),
                    '~' | '-' | '2' | '1' | '4' | '0' | '3' => (false, false, false),
                    character => {
                        return Err(PLAReadError::at(
                            lineno,
                            PLAError::BadOutputCharacter { character, column },
                        ))
                    }
                };
                f_outputs.push(f);
                d_outputs.push(d);
                r_outputs.push(r);
                has_f |= f;
                has_d |= d;
                has_r |= r;
            }

            if has_f {
                cubes.push(Cube::new(&inputs, &f_outputs, CubeType::F));
            }
            if has_d {
                cubes.push(Cube::new(&inputs, &d_outputs, CubeType::D));
            }
            if has_r {
                cubes.push(Cube::new(&inputs, &r_outputs, CubeType::R));
            }
        }

        let num_inputs = num_inputs.ok_or_else(|| {
            PLAReadError::at(lineno, PLAError::MissingDirective { directive: ".i" })
        })?;
        let num_outputs = num_outputs.ok_or_else(|| {
            PLAReadError::at(lineno, PLAError::MissingDirective { directive: ".o" })
        })?;

        let input_labels = check_labels(".ilb", input_labels, num_inputs)?;
        let output_labels = check_labels(".ob", output_labels, num_outputs)?;

        Ok(T::create_from_pla_parts(
            num_inputs,
            num_outputs,
            input_labels,
            output_labels,
            cubes,
            cover_type,
        ))
    }
}

fn parse_dimension(
    directive: &'static str,
    arg: Option<&&str>,
    lineno: usize,
) -> Result<usize, PLAReadError> {
    arg.and_then(|s| s.parse().ok()).ok_or_else(|| {
        PLAReadError::at(
            lineno,
            PLAError::BadDirective {
                directive,
                value: arg.copied().unwrap_or_default().to_string(),
            },
        )
    })
}

fn check_labels(
    directive: &'static str,
    labels: Option<(Vec<Arc<str>>, usize)>,
    declared: usize,
) -> Result<Vec<Arc<str>>, PLAReadError> {
    match labels {
        None => Ok(Vec::new()),
        Some((labels, _)) if labels.len() == declared => Ok(labels),
        Some((labels, line)) => Err(PLAReadError::at(
            line,
            PLAError::LabelCount {
                directive,
                labels: labels.len(),
                declared,
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_basic_pla() {
        let pla = ".i 3\n.o 1\n.p 2\n01- 1\n1-0 1\n.e\n";
        let cover = Cover::from_pla_string(pla).unwrap();
        assert_eq!(cover.num_inputs(), 3);
        assert_eq!(cover.num_outputs(), 1);
        assert_eq!(cover.num_cubes(), 2);
    }

    #[test]
    fn reads_labels_and_comments() {
        let pla = "# majority\n.i 3\n.ilb a b c\n.o 1\n.ob m\n-11 1\n1-1 1\n11- 1\n.e\n";
        let cover = Cover::from_pla_string(pla).unwrap();
        assert_eq!(cover.input_labels()[1].as_ref(), "b");
        assert_eq!(cover.output_labels()[0].as_ref(), "m");
    }

    #[test]
    fn infers_dimensions_from_first_cube() {
        let pla = "01- 1\n1-0 1\n.e\n";
        let cover = Cover::from_pla_string(pla).unwrap();
        assert_eq!(cover.num_inputs(), 3);
        assert_eq!(cover.num_outputs(), 1);
    }

    #[test]
    fn dash_output_becomes_dont_care_cube() {
        let pla = ".i 2\n.o 1\n01 1\n11 -\n.e\n";
        let cover = Cover::from_pla_string(pla).unwrap();
        // default FD type: the '-' output line is a D cube
        let d_cubes = cover
            .raw_cubes()
            .iter()
            .filter(|c| c.cube_type() == CubeType::D)
            .count();
        assert_eq!(d_cubes, 1);
        assert_eq!(cover.num_cubes(), 1);
    }

    #[test]
    fn type_f_ignores_dash_outputs() {
        let pla = ".type f\n.i 2\n.o 1\n01 1\n11 -\n.e\n";
        let cover = Cover::from_pla_string(pla).unwrap();
        assert_eq!(cover.raw_cubes().len(), 1);
    }

    #[test]
    fn fr_type_splits_zero_outputs() {
        let pla = ".type fr\n.i 2\n.o 2\n01 10\n10 01\n.end\n";
        let cover = Cover::from_pla_string(pla).unwrap();
        let f = cover
            .raw_cubes()
            .iter()
            .filter(|c| c.cube_type() == CubeType::F)
            .count();
        let r = cover
            .raw_cubes()
            .iter()
            .filter(|c| c.cube_type() == CubeType::R)
            .count();
        assert_eq!(f, 2);
        assert_eq!(r, 2);
    }

    #[test]
    fn rejects_bad_characters_with_line() {
        let pla = ".i 2\n.o 1\n0z 1\n.e\n";
        match Cover::from_pla_string(pla) {
            Err(PLAReadError::Syntax { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(
                    source,
                    PLAError::BadInputCharacter { character: 'z', column: 1 }
                ));
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_cube_width() {
        let pla = ".i 3\n.o 1\n01 1\n.e\n";
        assert!(matches!(
            Cover::from_pla_string(pla),
            Err(PLAReadError::Syntax {
                source: PLAError::WrongCubeWidth { found: 3, .. },
                ..
            })
        ));
    }

    #[test]
    fn rejects_label_count_mismatch_at_its_line() {
        let pla = ".i 3\n.ilb a b\n.o 1\n011 1\n.e\n";
        match Cover::from_pla_string(pla) {
            Err(PLAReadError::Syntax { line, source }) => {
                assert_eq!(line, 2);
                assert!(matches!(
                    source,
                    PLAError::LabelCount { directive: ".ilb", labels: 2, declared: 3 }
                ));
            }
            other => panic!("expected a label error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_dimension_argument() {
        let pla = ".i lots\n.o 1\n.e\n";
        assert!(matches!(
            Cover::from_pla_string(pla),
            Err(PLAReadError::Syntax {
                line: 1,
                source: PLAError::BadDirective { directive: ".i", .. },
            })
        ));
    }

    #[test]
    fn missing_output_directive_reported_at_end() {
        let pla = ".i 2\n.e\n";
        assert!(matches!(
            Cover::from_pla_string(pla),
            Err(PLAReadError::Syntax {
                source: PLAError::MissingDirective { directive: ".o" },
                ..
            })
        ));
    }

    #[test]
    fn writer_emits_type_and_terminator() {
        let mut cover = Cover::new(CoverType::FD);
        cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
        cover.add_cube(&[Some(true), Some(true)], &[None]);
        let text = cover.to_pla_string(CoverType::FD).unwrap();
        assert!(text.starts_with(".type fd\n"));
        assert!(text.contains(".p 2"));
        assert!(text.ends_with(".end\n"));
        // D cube prints its bit as '2'
        assert!(text.contains("11 2"));
    }

    #[test]
    fn column_formatted_body_parses() {
        let pla = ".i 4\n.o 1\n0 1 - 1  1\n.e\n";
        let cover = Cover::from_pla_string(pla).unwrap();
        assert_eq!(cover.num_inputs(), 4);
        assert_eq!(cover.num_cubes(), 1);
    }
}
