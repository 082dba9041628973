use crate::plane::Plane;
use crate::polygon::Polygon;

#[cfg(feature = "parallel")]
use rayon::join;

/// A BSP tree node, containing polygons plus optional front/back subtrees.
///
/// The splitting plane is always the plane of the first polygon inserted at
/// this node (no balancing heuristic), so the tree shape is deterministic
/// given polygon order. A node with no plane is an empty tree.
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    pub plane: Option<Plane>,
    pub front: Option<Box<Node<S>>>,
    pub back: Option<Box<Node<S>>>,
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone> Default for Node<S> {
    fn default() -> Self {
        Node {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }
}

impl<S: Clone + Send + Sync> Node<S> {
    pub fn new(polygons: &[Polygon<S>]) -> Self {
        let mut node = Node::default();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Convert this tree to the complementary solid: flip every polygon and
    /// plane, and swap front/back subtree roles.
    pub fn invert(&mut self) {
        for p in &mut self.polygons {
            p.flip();
        }
        if let Some(ref mut plane) = self.plane {
            plane.flip();
        }

        #[cfg(feature = "parallel")]
        match (&mut self.front, &mut self.back) {
            (Some(front_node), Some(back_node)) => {
                join(|| front_node.invert(), || back_node.invert());
            }
            (Some(front_node), None) => front_node.invert(),
            (None, Some(back_node)) => back_node.invert(),
            (None, None) => {}
        }

        #[cfg(not(feature = "parallel"))]
        {
            if let Some(ref mut front) = self.front {
                front.invert();
            }
            if let Some(ref mut back) = self.back {
                back.invert();
            }
        }

        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Return the subset of `polygons` (with spanning polygons split) lying
    /// outside the solid this tree represents.
    ///
    /// Boundary conventions, relied on by the boolean sequences:
    /// - a node with no plane (empty tree) clips nothing and returns the
    ///   input unchanged;
    /// - a node with a plane but no back subtree discards its back set
    ///   (everything behind the deepest plane is solid interior).
    pub fn clip_polygons(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let Some(ref plane) = self.plane else {
            return polygons.to_vec();
        };

        let mut front: Vec<Polygon<S>> = Vec::new();
        let mut back: Vec<Polygon<S>> = Vec::new();

        for poly in polygons {
            // Coplanar polygons ride along with the side their normal faces.
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            plane.split_polygon(
                poly,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
            front.append(&mut coplanar_front);
            back.append(&mut coplanar_back);
        }

        #[cfg(feature = "parallel")]
        let (mut front, back) = join(
            move || match self.front {
                Some(ref f) => f.clip_polygons(&front),
                None => front,
            },
            move || match self.back {
                Some(ref b) => b.clip_polygons(&back),
                None => Vec::new(),
            },
        );

        #[cfg(not(feature = "parallel"))]
        let (mut front, back) = (
            match self.front {
                Some(ref f) => f.clip_polygons(&front),
                None => front,
            },
            match self.back {
                Some(ref b) => b.clip_polygons(&back),
                None => Vec::new(),
            },
        );

        front.extend(back);
        front
    }

    /// Remove all polygons in this BSP tree that are inside the other tree.
    pub fn clip_to(&mut self, bsp: &Node<S>) {
        self.polygons = bsp.clip_polygons(&self.polygons);

        #[cfg(feature = "parallel")]
        match (&mut self.front, &mut self.back) {
            (Some(front_node), Some(back_node)) => {
                join(|| front_node.clip_to(bsp), || back_node.clip_to(bsp));
            }
            (Some(front_node), None) => front_node.clip_to(bsp),
            (None, Some(back_node)) => back_node.clip_to(bsp),
            (None, None) => {}
        }

        #[cfg(not(feature = "parallel"))]
        {
            if let Some(ref mut front) = self.front {
                front.clip_to(bsp);
            }
            if let Some(ref mut back) = self.back {
                back.clip_to(bsp);
            }
        }
    }

    /// Return all polygons in this BSP tree.
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = self.polygons.clone();
        if let Some(ref front) = self.front {
            result.extend(front.all_polygons());
        }
        if let Some(ref back) = self.back {
            result.extend(back.all_polygons());
        }
        result
    }

    /// Build a BSP tree over the given polygons. Every input polygon ends up,
    /// possibly split into fragments, in some node's coplanar list.
    pub fn build(&mut self, polygons: &[Polygon<S>]) {
        if polygons.is_empty() {
            return;
        }

        // First polygon's plane becomes the splitting plane if not already set.
        if self.plane.is_none() {
            self.plane = Some(polygons[0].plane.clone());
        }
        let plane = self.plane.clone().unwrap();

        let mut front: Vec<Polygon<S>> = Vec::new();
        let mut back: Vec<Polygon<S>> = Vec::new();

        for p in polygons {
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            plane.split_polygon(
                p,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
            self.polygons.append(&mut coplanar_front);
            self.polygons.append(&mut coplanar_back);
        }

        if !front.is_empty() && self.front.is_none() {
            self.front = Some(Box::new(Node::default()));
        }
        if !back.is_empty() && self.back.is_none() {
            self.back = Some(Box::new(Node::default()));
        }

        #[cfg(feature = "parallel")]
        match (!front.is_empty(), !back.is_empty()) {
            (true, true) => {
                let front_node = self.front.as_mut().unwrap();
                let back_node = self.back.as_mut().unwrap();
                join(|| front_node.build(&front), || back_node.build(&back));
            }
            (true, false) => self.front.as_mut().unwrap().build(&front),
            (false, true) => self.back.as_mut().unwrap().build(&back),
            (false, false) => {}
        }

        #[cfg(not(feature = "parallel"))]
        {
            if !front.is_empty() {
                self.front.as_mut().unwrap().build(&front);
            }
            if !back.is_empty() {
                self.back.as_mut().unwrap().build(&back);
            }
        }
    }
}
