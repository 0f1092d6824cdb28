//! Hand-built syntax trees with known shapes.

use std::sync::Arc;

use completion_cache::syntax::{AccessLevel, NodeId, SyntaxTree, SyntaxTreeBuilder};

/// `namespace ns { void f(int); }`
pub struct Scenario {
    pub tree: Arc<SyntaxTree>,
    pub ns: NodeId,
    pub f: NodeId,
}

pub fn scenario() -> Scenario {
    let mut b = SyntaxTreeBuilder::new();
    let ns = b.namespace(b.root(), "ns");
    let f = b.function(ns, "f", &["int"], None);
    Scenario {
        tree: Arc::new(b.finish()),
        ns,
        f,
    }
}

/// A small class hierarchy inside `namespace geo`:
///
/// ```text
/// namespace geo {
///   struct Point;                      // forward declaration
///   struct Point { double x; double y; };
///   enum Color { Red, Green, Blue };
///   class Shape {
///   public:
///     Shape();
///     double area();
///     std::string describe();
///     static Shape* create(int);
///   protected:
///     Point origin;
///   private:
///     int id;
///   };
///   class Circle : public Shape {
///   public:
///     double area();
///     double radius;
///   private:
///     bool cached;
///   };
///   class Square : protected Shape { public: double side; };
/// }
/// int main();
/// int counter;
/// ```
pub struct Geometry {
    pub tree: Arc<SyntaxTree>,
    pub geo: NodeId,
    pub point_forward: NodeId,
    pub point: NodeId,
    pub color: NodeId,
    pub shape: NodeId,
    pub circle: NodeId,
    pub square: NodeId,
    pub main: NodeId,
}

pub fn geometry() -> Geometry {
    let mut b = SyntaxTreeBuilder::new();
    let root = b.root();
    let geo = b.namespace(root, "geo");

    let point_forward = b.structure(geo, "Point");
    b.forward_declaration(point_forward);
    let point = b.structure(geo, "Point");
    b.field(point, "x", "double", AccessLevel::Public);
    b.field(point, "y", "double", AccessLevel::Public);

    let color = b.enumeration(geo, "Color", &["Red", "Green", "Blue"]);

    let shape = b.class(geo, "Shape");
    b.constructor(shape, "Shape", &[]);
    b.method(shape, "area", &[], Some("double"), AccessLevel::Public, false);
    b.method(shape, "describe", &[], Some("std::string"), AccessLevel::Public, false);
    b.method(shape, "create", &["int"], Some("Shape*"), AccessLevel::Public, true);
    b.field(shape, "origin", "Point", AccessLevel::Protected);
    b.field(shape, "id", "int", AccessLevel::Private);

    let circle = b.class(geo, "Circle");
    b.method(circle, "area", &[], Some("double"), AccessLevel::Public, false);
    b.field(circle, "radius", "double", AccessLevel::Public);
    b.field(circle, "cached", "bool", AccessLevel::Private);
    b.inherit(circle, shape, AccessLevel::Public);

    let square = b.class(geo, "Square");
    b.field(square, "side", "double", AccessLevel::Public);
    b.inherit(square, shape, AccessLevel::Protected);

    let main = b.function(root, "main", &[], Some("int"));
    b.variable(root, "counter", "int");

    Geometry {
        tree: Arc::new(b.finish()),
        geo,
        point_forward,
        point,
        color,
        shape,
        circle,
        square,
        main,
    }
}

/// The geometry tree in the JSON form the CLI reads.
pub fn geometry_json() -> String {
    serde_json::to_string_pretty(geometry().tree.as_ref()).unwrap_or_default()
}
