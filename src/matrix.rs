use std::ops::Mul;

///
/// A 3x3 affine transformation matrix, stored in row-major order
///
/// Points transform as column vectors (`p' = M * p`), so in a product
/// `a * b` the matrix `b` applies first. `to_uniform()` exports the
/// column-major float array that `UniformMatrix3fv` expects.
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Matrix(pub [[f32; 3]; 3]);

impl Matrix {
    ///
    /// Returns the identity matrix
    ///
    pub fn identity() -> Matrix {
        Matrix([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0]
        ])
    }

    ///
    /// Returns a matrix that translates by (dx, dy)
    ///
    pub fn translate(dx: f32, dy: f32) -> Matrix {
        Matrix([
            [1.0, 0.0, dx],
            [0.0, 1.0, dy],
            [0.0, 0.0, 1.0]
        ])
    }

    ///
    /// Returns a matrix that rotates anti-clockwise by an angle in radians
    ///
    pub fn rotate(radians: f32) -> Matrix {
        let cos = radians.cos();
        let sin = radians.sin();

        Matrix([
            [cos, -sin, 0.0],
            [sin, cos,  0.0],
            [0.0, 0.0,  1.0]
        ])
    }

    ///
    /// Returns a matrix that scales by (sx, sy)
    ///
    pub fn scale(sx: f32, sy: f32) -> Matrix {
        Matrix([
            [sx,  0.0, 0.0],
            [0.0, sy,  0.0],
            [0.0, 0.0, 1.0]
        ])
    }

    ///
    /// Applies this matrix to a point
    ///
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let Matrix(m) = self;

        (m[0][0]*x + m[0][1]*y + m[0][2],
         m[1][0]*x + m[1][1]*y + m[1][2])
    }

    ///
    /// The column-major 9-float representation used for a mat3 uniform
    ///
    pub fn to_uniform(&self) -> [f32; 9] {
        let Matrix(m) = self;

        [
            m[0][0], m[1][0], m[2][0],
            m[0][1], m[1][1], m[2][1],
            m[0][2], m[1][2], m[2][2]
        ]
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        let Matrix(a) = self;
        let Matrix(b) = rhs;
        let mut result = [[0.0; 3]; 3];

        for row in 0..3 {
            for col in 0..3 {
                result[row][col] = a[row][0]*b[0][col] + a[row][1]*b[1][col] + a[row][2]*b[2][col];
            }
        }

        Matrix(result)
    }
}
