use super::*;

fn sprite(g: &mut SceneGraph, parent: NodeId, w: f64, h: f64) -> NodeId {
    let id = g.add_sprite(parent, "tex").unwrap();
    let r = g.get_mut(id).unwrap();
    r.width = w;
    r.height = h;
    id
}

#[test]
fn every_node_has_exactly_one_parent() {
    let mut g = SceneGraph::new();
    let stage = g.stage();
    let group = g.add_container(stage).unwrap();
    let a = sprite(&mut g, group, 10.0, 10.0);
    let b = sprite(&mut g, stage, 10.0, 10.0);

    assert_eq!(g.parent(stage).unwrap(), None);
    assert_eq!(g.parent(group).unwrap(), Some(stage));
    assert_eq!(g.parent(a).unwrap(), Some(group));
    assert_eq!(g.parent(b).unwrap(), Some(stage));

    let mut seen = Vec::new();
    g.visit(|id, _, _| seen.push(id));
    assert_eq!(seen, vec![stage, group, a, b]);
    assert_eq!(seen.len(), g.len());
}

#[test]
fn sprites_cannot_hold_children() {
    let mut g = SceneGraph::new();
    let stage = g.stage();
    let s = sprite(&mut g, stage, 1.0, 1.0);
    assert!(g.add_container(s).is_err());
    assert!(g.add_sprite(s, "x").is_err());
}

#[test]
fn unknown_handle_is_a_lookup_error() {
    let g = SceneGraph::new();
    let err = g.get(NodeId(42)).unwrap_err();
    assert!(err.is_lookup());
}

#[test]
fn container_bounds_union_children() {
    let mut g = SceneGraph::new();
    let stage = g.stage();
    let group = g.add_container(stage).unwrap();
    let a = sprite(&mut g, group, 100.0, 20.0);
    let b = sprite(&mut g, group, 50.0, 80.0);
    g.get_mut(a).unwrap().x = 10.0;
    g.get_mut(b).unwrap().y = 5.0;

    let bounds = g.local_bounds(group).unwrap().unwrap();
    assert_eq!(bounds, Rect::new(0.0, 0.0, 110.0, 85.0));
    assert_eq!(g.measured_size(group).unwrap(), Size::new(110.0, 85.0));
}

#[test]
fn mirrored_sprite_covers_same_area() {
    let mut g = SceneGraph::new();
    let stage = g.stage();
    let s = sprite(&mut g, stage, 40.0, 10.0);
    {
        let r = g.get_mut(s).unwrap();
        r.x = 5.0;
        r.scale.x = -1.0;
        r.anchor.x = 1.0;
    }
    let b = g.bounds_in_parent(s).unwrap().unwrap();
    assert_eq!(b, Rect::new(5.0, 0.0, 45.0, 10.0));
}

#[test]
fn fit_width_scales_container_content() {
    let mut g = SceneGraph::new();
    let stage = g.stage();
    let group = g.add_container(stage).unwrap();
    sprite(&mut g, group, 200.0, 10.0);

    g.fit_width(group, 150.0).unwrap();
    let r = g.get(group).unwrap();
    assert_eq!(r.scale.x, 0.75);
    assert_eq!(r.width, 150.0);
    assert_eq!(g.measured_size(group).unwrap().width, 150.0);
}

#[test]
fn sprite_draws_follow_painter_order_and_multiply_alpha() {
    let mut g = SceneGraph::new();
    let stage = g.stage();
    let back = sprite(&mut g, stage, 10.0, 10.0);
    let group = g.add_container(stage).unwrap();
    g.get_mut(group).unwrap().alpha = 0.5;
    g.get_mut(group).unwrap().x = 3.0;
    let inner = sprite(&mut g, group, 4.0, 4.0);
    g.get_mut(inner).unwrap().alpha = 0.5;
    let hidden = sprite(&mut g, stage, 4.0, 4.0);
    g.get_mut(hidden).unwrap().alpha = 0.0;

    let draws = g.sprite_draws().unwrap();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].node, back);
    assert_eq!(draws[1].node, inner);
    assert_eq!(draws[1].alpha, 0.25);
    assert_eq!(
        draws[1].transform * Point::ZERO,
        Point::new(3.0, 0.0)
    );
}
