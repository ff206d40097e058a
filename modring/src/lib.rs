//! # modring
//!
//! Arithmetic over residue rings Z/NZ for a runtime-chosen modulus `N`:
//!
//! - [`ring`]: residue normalization and unit inverses ([`Ring`]), plus the unreduced
//!   integer-matrix engine ([`IntMatrix`]).
//! - [`mod_mat`]: matrices whose entries are kept reduced into `[0, N)` ([`ModMatrix`]),
//!   with borrowing windows.
//! - [`mod_poly`]: dense polynomials mod N and their monic normalization ([`ModPoly`]).
//! - [`mpoly`]: sparse multivariate integer polynomials and scalar scaling ([`MPoly`]).

pub mod errors;
pub mod mod_mat;
pub mod mod_poly;
pub mod mpoly;
pub mod ring;

pub use errors::ModRingError;
pub use mod_mat::{ModMatrix, ModMatrixWindow, ModMatrixWindowMut};
pub use mod_poly::ModPoly;
pub use mpoly::MPoly;
pub use ring::{IntMatrix, IntMatrixView, Ring, reduce};
