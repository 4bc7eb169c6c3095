//! Named polyhedron templates.
//!
//! A [`Solid`] is an ordered list of base triangles in model space, origin centred and at unit
//! scale. The five built-in solids are kept in a [`SolidRegistry`] which is built once on first
//! use and never mutated afterwards, so it can be read from any thread without locking.

use std::{fmt, str::FromStr, sync::LazyLock};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::MeshError;

/// The golden ratio.
const PHI: f32 = 1.618_034;

/// Distance under which a point counts as lying on a face plane.
const PLANE_EPSILON: f32 = 1e-4;

/// The names of the built-in solids, one per classical element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidName {
    /// Octahedron.
    Air,
    /// Tetrahedron.
    Fire,
    /// Icosahedron.
    Water,
    /// Cube.
    Earth,
    /// Dodecahedron.
    Space,
}

impl SolidName {
    pub const ALL: [SolidName; 5] = [
        SolidName::Air,
        SolidName::Fire,
        SolidName::Water,
        SolidName::Earth,
        SolidName::Space,
    ];

    /// Returns the lowercase name used in scene files.
    pub fn as_str(self) -> &'static str {
        match self {
            SolidName::Air => "air",
            SolidName::Fire => "fire",
            SolidName::Water => "water",
            SolidName::Earth => "earth",
            SolidName::Space => "space",
        }
    }

    /// Returns the polyhedron this element is drawn as.
    pub fn polyhedron(self) -> &'static str {
        match self {
            SolidName::Air => "octahedron",
            SolidName::Fire => "tetrahedron",
            SolidName::Water => "icosahedron",
            SolidName::Earth => "cube",
            SolidName::Space => "dodecahedron",
        }
    }
}

impl fmt::Display for SolidName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolidName {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolidName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MeshError::UnknownSolid(s.to_string()))
    }
}

/// A polyhedron template: a list of base triangles, each wound counter-clockwise when seen from
/// outside the solid.
///
/// The winding is a contract on the data. Nothing here checks it for solids built with
/// [`Solid::from_triangles`] or [`Solid::from_flat`]; inward wound triangles simply produce
/// inward facing normals.
#[derive(Clone, Debug, PartialEq)]
pub struct Solid {
    label: String,
    triangles: Vec<[Vec3; 3]>,
}

impl Solid {
    /// Creates a solid from caller supplied triangles.
    pub fn from_triangles(label: impl Into<String>, triangles: Vec<[Vec3; 3]>) -> Self {
        Self {
            label: label.into(),
            triangles,
        }
    }

    /// Creates a solid from flat `x, y, z` floats, nine per triangle.
    pub fn from_flat(label: impl Into<String>, data: &[f32]) -> Result<Self, MeshError> {
        let label = label.into();
        if data.len() % 9 != 0 {
            return Err(MeshError::MalformedSolid {
                label,
                len: data.len(),
            });
        }

        let triangles = data
            .chunks_exact(9)
            .map(|t| {
                [
                    Vec3::from_slice(&t[0..3]),
                    Vec3::from_slice(&t[3..6]),
                    Vec3::from_slice(&t[6..9]),
                ]
            })
            .collect();

        Ok(Self { label, triangles })
    }

    /// Builds the triangles of the convex polyhedron spanned by `points`.
    ///
    /// Every face plane of the point set is found, the vertices on it are ordered
    /// counter-clockwise as seen from outside and the resulting polygon is fan triangulated, so
    /// the output always satisfies the outward winding contract. The points should surround the
    /// origin. Coplanar points enclose no volume and give a solid without triangles.
    pub fn convex_hull(label: impl Into<String>, points: &[Vec3]) -> Self {
        let label = label.into();
        let Some(faces) = hull_faces(points) else {
            log::warn!("Points of solid '{label}' are coplanar, the hull is empty");
            return Self {
                label,
                triangles: Vec::new(),
            };
        };

        let triangles = faces
            .iter()
            .flat_map(|face| {
                (1..face.len() - 1)
                    .map(move |i| [points[face[0]], points[face[i]], points[face[i + 1]]])
            })
            .collect();

        Self { label, triangles }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn triangles(&self) -> &[[Vec3; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Finds the faces of the convex hull of `points` as lists of point indices, each list ordered
/// counter-clockwise around the outward face normal.
///
/// Returns `None` when all points lie in one plane.
fn hull_faces(points: &[Vec3]) -> Option<Vec<Vec<usize>>> {
    let mut planes: Vec<(Vec3, f32)> = Vec::new();
    let mut faces = Vec::new();

    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            for k in (j + 1)..points.len() {
                let cross = (points[j] - points[i]).cross(points[k] - points[i]);
                if cross.length() < PLANE_EPSILON {
                    continue;
                }

                let mut normal = cross.normalize();
                let mut offset = normal.dot(points[i]);

                let mut above = false;
                let mut below = false;
                for p in points {
                    let distance = normal.dot(*p) - offset;
                    if distance > PLANE_EPSILON {
                        above = true;
                    } else if distance < -PLANE_EPSILON {
                        below = true;
                    }
                }
                if above && below {
                    continue;
                }
                if !above && !below {
                    return None;
                }
                // All remaining points must sit behind the plane.
                if above {
                    normal = -normal;
                    offset = -offset;
                }

                let known = planes.iter().any(|(n, o)| {
                    n.abs_diff_eq(normal, PLANE_EPSILON) && (o - offset).abs() < PLANE_EPSILON
                });
                if known {
                    continue;
                }
                planes.push((normal, offset));

                let members = (0..points.len())
                    .filter(|&m| (normal.dot(points[m]) - offset).abs() <= PLANE_EPSILON)
                    .collect();
                faces.push(wind_face(points, members, normal));
            }
        }
    }

    Some(faces)
}

/// Sorts the vertices of a planar convex face counter-clockwise around `normal`.
fn wind_face(points: &[Vec3], mut members: Vec<usize>, normal: Vec3) -> Vec<usize> {
    let centre = members.iter().map(|&m| points[m]).sum::<Vec3>() / members.len() as f32;
    let u = (points[members[0]] - centre).normalize();
    let w = normal.cross(u);

    let angle = |m: usize| {
        let d = points[m] - centre;
        d.dot(w).atan2(d.dot(u))
    };
    members.sort_by(|&a, &b| angle(a).total_cmp(&angle(b)));
    members
}

/// All sign combinations of `(x, y, z)`, i.e. the corners of a box.
fn corners(x: f32, y: f32, z: f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(8);
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                out.push(Vec3::new(x * sx, y * sy, z * sz));
            }
        }
    }
    out
}

/// The cyclic permutations of `(0, ±a, ±b)`.
fn cyclic_permutations(a: f32, b: f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(12);
    for sa in [-1.0, 1.0] {
        for sb in [-1.0, 1.0] {
            let (a, b) = (a * sa, b * sb);
            out.push(Vec3::new(0.0, a, b));
            out.push(Vec3::new(a, b, 0.0));
            out.push(Vec3::new(b, 0.0, a));
        }
    }
    out
}

fn build_solid(name: SolidName) -> Solid {
    let (points, on_unit_sphere) = match name {
        SolidName::Air => (
            vec![Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z],
            false,
        ),
        SolidName::Fire => (
            vec![
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(-1.0, -1.0, 1.0),
            ],
            true,
        ),
        SolidName::Water => (cyclic_permutations(1.0, PHI), true),
        SolidName::Earth => (corners(1.0, 1.0, 1.0), false),
        SolidName::Space => {
            let mut points = corners(1.0, 1.0, 1.0);
            points.extend(cyclic_permutations(1.0 / PHI, PHI));
            (points, true)
        }
    };

    let points: Vec<Vec3> = if on_unit_sphere {
        points.iter().map(|p| p.normalize()).collect()
    } else {
        points
    };

    Solid::convex_hull(name.as_str(), &points)
}

/// The read-only table of built-in solids.
pub struct SolidRegistry {
    solids: Vec<Solid>,
}

static REGISTRY: LazyLock<SolidRegistry> = LazyLock::new(SolidRegistry::build);

/// Returns the process wide solid registry, building it on first call.
pub fn registry() -> &'static SolidRegistry {
    &REGISTRY
}

impl SolidRegistry {
    fn build() -> Self {
        let start = std::time::Instant::now();
        let solids: Vec<Solid> = SolidName::ALL.into_iter().map(build_solid).collect();
        log::debug!(
            "Built {} solids ({} triangles) in {:?}",
            solids.len(),
            solids.iter().map(Solid::triangle_count).sum::<usize>(),
            start.elapsed()
        );
        Self { solids }
    }

    /// Returns the built-in solid with the given name.
    pub fn get(&self, name: SolidName) -> &Solid {
        &self.solids[name as usize]
    }

    /// Looks a solid up by its textual name.
    pub fn lookup(&self, name: &str) -> Result<&Solid, MeshError> {
        Ok(self.get(name.parse()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SolidName, &Solid)> {
        SolidName::ALL.into_iter().map(|name| (name, self.get(name)))
    }
}
