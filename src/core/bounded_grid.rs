use crate::core::models::Vec2;

/// Dense storage for a `width` x `height` board with its origin at (0, 0).
pub struct BoundedGrid<T> {
    extent: Vec2,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new_with_size(width: i32, height: i32, default: T) -> Self
    where
        T: Clone,
    {
        let area = (width.max(0) * height.max(0)) as usize;
        BoundedGrid {
            extent: Vec2 { x: width, y: height },
            cells: vec![default; area],
        }
    }

    pub fn width(&self) -> i32 {
        self.extent.x
    }

    pub fn height(&self) -> i32 {
        self.extent.y
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        (0..self.extent.x).contains(&pos.x) && (0..self.extent.y).contains(&pos.y)
    }

    pub fn get(&self, pos: &Vec2) -> Option<&T> {
        self.contains(pos).then(|| &self[pos])
    }

    /// Every cell in row-major order along with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Vec2, &T)> {
        let width = self.extent.x;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as i32;
            (Vec2 { x: i % width, y: i / width }, cell)
        })
    }

    fn offset(&self, pos: &Vec2) -> usize {
        (pos.y * self.extent.x + pos.x) as usize
    }
}

impl<T> std::ops::Index<&Vec2> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Vec2) -> &Self::Output {
        &self.cells[self.offset(index)]
    }
}

impl<T> std::ops::IndexMut<&Vec2> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Vec2) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.cells[offset]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_outside_bounds_is_none() {
        let grid = BoundedGrid::new_with_size(3, 2, 0u8);

        assert_eq!(grid.get(&Vec2 { x: 2, y: 1 }), Some(&0));
        assert_eq!(grid.get(&Vec2 { x: 3, y: 0 }), None);
        assert_eq!(grid.get(&Vec2 { x: 0, y: 2 }), None);
        assert_eq!(grid.get(&Vec2 { x: -1, y: 0 }), None);
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut grid = BoundedGrid::new_with_size(2, 2, 0u8);
        grid[&Vec2 { x: 1, y: 0 }] = 1;
        grid[&Vec2 { x: 0, y: 1 }] = 2;

        let cells: Vec<(Vec2, u8)> = grid.iter().map(|(pos, &c)| (pos, c)).collect();
        assert_eq!(
            cells,
            vec![
                (Vec2 { x: 0, y: 0 }, 0),
                (Vec2 { x: 1, y: 0 }, 1),
                (Vec2 { x: 0, y: 1 }, 2),
                (Vec2 { x: 1, y: 1 }, 0),
            ]
        );
    }
}
