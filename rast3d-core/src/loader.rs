/// Mesh loader for the `v x y z` / `f i j k` text format
///
/// Faces use 1-based indices into the vertices declared above them and are
/// resolved immediately, so the resulting triangles carry coordinates, not
/// indices. Lines with any other leading keyword are skipped.
use log::{debug, info};
use nalgebra::Point3;
use nom::{
    bytes::complete::{take_till1, take_while, take_while1},
    character::complete::digit1,
    combinator::{all_consuming, map},
    multi::many0,
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};
use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::geometry::{Mesh, Triangle};

/// Read and parse a mesh file
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loading mesh: {}", path.display());
    parse_mesh(&source)
}

/// Parse mesh text into triangles in face declaration order
pub fn parse_mesh(source: &str) -> Result<Mesh, LoadError> {
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut mesh = Mesh::new();

    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        if text.trim().is_empty() {
            continue;
        }

        let (keyword, fields) = split_record(text).map_err(|_| LoadError::Format {
            line,
            message: format!("unreadable record {:?}", text),
        })?;

        match keyword {
            "v" => {
                let [x, y, z] = fields3(line, keyword, &fields)?;
                vertices.push(Point3::new(
                    parse_field(line, x, double)?,
                    parse_field(line, y, double)?,
                    parse_field(line, z, double)?,
                ));
            }
            "f" => {
                let [a, b, c] = fields3(line, keyword, &fields)?;
                let a = resolve(line, &vertices, parse_field(line, a, index)?)?;
                let b = resolve(line, &vertices, parse_field(line, b, index)?)?;
                let c = resolve(line, &vertices, parse_field(line, c, index)?)?;
                mesh.add_triangle(Triangle::new(a, b, c));
            }
            other => debug!("line {}: skipping {:?} record", line, other),
        }
    }

    info!(
        "Loaded {} vertices, {} triangles",
        vertices.len(),
        mesh.len()
    );
    Ok(mesh)
}

/// One whitespace-free token
fn token(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

fn blank0(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn blank1(input: &str) -> IResult<&str, &str> {
    take_while1(char::is_whitespace)(input)
}

/// Unsigned face index; values past `usize::MAX` saturate so they fail the range check
fn index(input: &str) -> IResult<&str, usize> {
    map(digit1, |digits: &str| digits.parse().unwrap_or(usize::MAX))(input)
}

/// `keyword field*`, tolerating leading and trailing whitespace
fn record(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    let (input, keyword) = preceded(blank0, token)(input)?;
    let (input, fields) = terminated(many0(preceded(blank1, token)), blank0)(input)?;
    Ok((input, (keyword, fields)))
}

fn split_record(text: &str) -> Result<(&str, Vec<&str>), nom::Err<nom::error::Error<&str>>> {
    all_consuming(record)(text).map(|(_, parsed)| parsed)
}

fn fields3<'a>(line: usize, keyword: &str, fields: &[&'a str]) -> Result<[&'a str; 3], LoadError> {
    match fields {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(LoadError::Format {
            line,
            message: format!(
                "'{}' record needs 3 values, found {}",
                keyword,
                fields.len()
            ),
        }),
    }
}

/// Run a number parser over an entire token
fn parse_field<'a, T>(
    line: usize,
    field: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
) -> Result<T, LoadError> {
    all_consuming(parser)(field)
        .map(|(_, value)| value)
        .map_err(|_| LoadError::Format {
            line,
            message: format!("invalid number {:?}", field),
        })
}

fn resolve(
    line: usize,
    vertices: &[Point3<f64>],
    index: usize,
) -> Result<Point3<f64>, LoadError> {
    if index == 0 || index > vertices.len() {
        return Err(LoadError::Index {
            line,
            index,
            available: vertices.len(),
        });
    }
    Ok(vertices[index - 1])
}
