#[macro_use]
extern crate approx;
extern crate turbine_assembly;

use approx::AbsDiffEq;
use turbine_assembly::prelude::*;

fn turned(position: [f64; 3], axis: [f64; 3], degrees: f64) -> Transform {
    Transform::from_axis_angle(position, axis, Deg(degrees))
}

#[test]
fn composition_order() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let pc = turned([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], 90.0);
    let pl = turned([1.0, 0.0, 0.0], [1.0, 0.0, 0.0], 90.0);
    let c = doc.add_container("Frame", pc);
    let l = doc.add_leaf("YawBearing", "Part::Feature", pl);
    doc.add_child(c, l).unwrap();

    let instances = Resolver::new(&scene).resolve(&[c], stop::never()).unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].node, l);
    assert_relative_eq!(instances[0].world_placement, pc * pl, epsilon = 1e-12);
    assert_relative_eq!(instances[0].world_placement.position.x, 1.0, epsilon = 1e-12);
    assert_relative_eq!(instances[0].world_placement.position.y, 1.0, epsilon = 1e-12);

    // Composition does not commute.
    assert!(!(pl * pc).abs_diff_eq(&instances[0].world_placement, 1e-9));
}

#[test]
fn link_transform_suppression() {
    let mut scene = DocumentSet::new();
    let parts = scene.add_document("Parts").unwrap();
    let asm = scene.add_document("Assembly").unwrap();

    let pt = turned([0.0, 2.0, 0.0], [0.0, 0.0, 1.0], 30.0);
    let target = scene
        .document_mut(parts)
        .unwrap()
        .add_leaf("Stator", "Part::Feature", pt);

    let doc = scene.document_mut(asm).unwrap();
    let c = doc.add_container("Alternator", Transform::from_position([0.0, 0.0, 5.0]));
    let pk = Transform::from_position([1.0, 0.0, 0.0]);
    let fixed = doc.add_link("StatorFixed", target, pk, false);
    let offset = doc.add_link("StatorOffset", target, pk, true);
    doc.add_child(c, fixed).unwrap();
    doc.add_child(c, offset).unwrap();

    let base = Transform::from_position([0.0, 0.0, 5.0]) * pk;
    let instances = Resolver::new(&scene).resolve(&[c], stop::never()).unwrap();
    assert_eq!(instances.len(), 2);

    assert_eq!(instances[0].node, target);
    assert_relative_eq!(instances[0].world_placement, base, epsilon = 1e-12);

    assert_eq!(instances[1].node, target);
    assert_relative_eq!(instances[1].world_placement, base * pt, epsilon = 1e-12);
}

#[test]
fn stopped_link_keeps_target_placement() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let pt = turned([0.0, 0.0, 3.0], [0.0, 1.0, 0.0], 45.0);
    let target = doc.add_container("Fasteners", pt);
    let bolt = doc.add_leaf("Bolt", "Part::Feature", Transform::from_position([9.0, 0.0, 0.0]));
    doc.add_child(target, bolt).unwrap();

    let pk = turned([2.0, 0.0, 0.0], [0.0, 0.0, 1.0], 90.0);
    let applied = doc.add_link("FastenersLink", target, pk, true);
    let fixed = doc.add_link("FastenersFixed", target, pk, false);

    let resolver = Resolver::new(&scene);
    let instances = resolver
        .resolve(&[applied, fixed], stop::label_prefixes(&["Fasteners"]))
        .unwrap();

    assert_eq!(instances.len(), 2);
    assert_eq!(instances[0].node, applied);
    assert_relative_eq!(instances[0].world_placement, pk * pt, epsilon = 1e-12);
    assert_eq!(instances[1].node, fixed);
    assert_relative_eq!(instances[1].world_placement, pk, epsilon = 1e-12);
}

#[test]
fn stop_prunes_descendants() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let placement = Transform::from_position([4.0, 0.0, 0.0]);
    let frame = doc.add_container("Frame", placement);
    let mut parent = frame;
    for i in 0..5 {
        let child = doc.add_container(format!("Level{}", i).as_str(), Transform::identity());
        let leaf = doc.add_leaf(format!("Plate{}", i).as_str(), "Part::Feature", Transform::identity());
        doc.add_child(parent, child).unwrap();
        doc.add_child(child, leaf).unwrap();
        parent = child;
    }

    let resolver = Resolver::new(&scene);
    let instances = resolver.resolve(&[frame], stop::labels(&["Frame"])).unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].node, frame);
    assert!(instances[0].ancestor_path.is_empty());
    assert_relative_eq!(instances[0].world_placement, placement, epsilon = 1e-12);

    let instances = resolver.resolve(&[frame], stop::never()).unwrap();
    assert_eq!(instances.len(), 5);
}

#[test]
fn pre_order_with_ancestor_paths() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    // c1 <- (l1, c2 <- (l2, l3), l4)
    let c1 = doc.add_container("c1", Transform::identity());
    let c2 = doc.add_container("c2", Transform::identity());
    let l1 = doc.add_leaf("l1", "Part::Feature", Transform::identity());
    let l2 = doc.add_leaf("l2", "Part::Feature", Transform::identity());
    let l3 = doc.add_leaf("l3", "Part::Feature", Transform::identity());
    let l4 = doc.add_leaf("l4", "Part::Feature", Transform::identity());

    doc.add_child(c1, l1).unwrap();
    doc.add_child(c1, c2).unwrap();
    doc.add_child(c2, l2).unwrap();
    doc.add_child(c2, l3).unwrap();
    doc.add_child(c1, l4).unwrap();

    let instances = Resolver::new(&scene).resolve(&[c1], stop::never()).unwrap();
    let nodes: Vec<_> = instances.iter().map(|v| v.node).collect();
    assert_eq!(nodes, [l1, l2, l3, l4]);

    assert_eq!(instances[0].ancestor_path.as_slice(), &[c1]);
    assert_eq!(instances[1].ancestor_path.as_slice(), &[c1, c2]);
    assert_eq!(instances[2].ancestor_path.as_slice(), &[c1, c2]);
    assert_eq!(instances[3].ancestor_path.as_slice(), &[c1]);
}

#[test]
fn stop_predicate_sees_ancestors() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let outer = doc.add_container("Outer", Transform::identity());
    let inner = doc.add_container("Inner", Transform::identity());
    let leaf = doc.add_leaf("Leaf", "Part::Feature", Transform::identity());
    doc.add_child(outer, inner).unwrap();
    doc.add_child(inner, leaf).unwrap();

    // Stops at anything nested two levels deep.
    let instances = Resolver::new(&scene)
        .resolve(&[outer], |_: &SceneNode, path: &[NodeRef]| !path.is_empty())
        .unwrap();

    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].node, inner);
    assert_eq!(instances[0].ancestor_path.as_slice(), &[outer]);
}

#[test]
fn chain_from_parent_placement() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let local = Transform::from_position([0.0, 1.0, 0.0]);
    let leaf = doc.add_leaf("Blade", "Part::Feature", local);
    let parent = turned([0.0, 0.0, 2.0], [0.0, 0.0, 1.0], 120.0);

    let resolver = Resolver::new(&scene);
    let chained = resolver
        .resolve_from(&[leaf], stop::never(), Some(parent), true)
        .unwrap();
    assert_relative_eq!(chained[0].world_placement, parent * local, epsilon = 1e-12);

    let unchained = resolver
        .resolve_from(&[leaf], stop::never(), Some(parent), false)
        .unwrap();
    assert_relative_eq!(unchained[0].world_placement, parent, epsilon = 1e-12);

    let root = resolver.resolve_from(&[leaf], stop::never(), None, false).unwrap();
    assert_relative_eq!(root[0].world_placement, local, epsilon = 1e-12);
}

#[test]
fn aliased_targets_resolve_twice() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let magnet = doc.add_leaf("Magnet", "Part::Feature", Transform::identity());
    let rotor = doc.add_container("Rotor", Transform::identity());
    let front = doc.add_link("MagnetFront", magnet, Transform::from_position([0.0, 0.0, 1.0]), true);
    let back = doc.add_link("MagnetBack", magnet, Transform::from_position([0.0, 0.0, -1.0]), true);
    doc.add_child(rotor, front).unwrap();
    doc.add_child(rotor, back).unwrap();

    let instances = Resolver::new(&scene).resolve(&[rotor], stop::never()).unwrap();
    assert_eq!(instances.len(), 2);
    assert!(instances.iter().all(|v| v.node == magnet));
    assert_relative_eq!(instances[0].world_placement.position.z, 1.0);
    assert_relative_eq!(instances[1].world_placement.position.z, -1.0);
}

#[test]
fn arrays_are_terminal_and_expand() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let magnet = doc.add_leaf("Magnet", "Part::Feature", Transform::identity());
    let elements: Vec<_> = (0..3)
        .map(|i| ArrayElement {
            index: i,
            placement: turned([0.0; 3], [0.0, 0.0, 1.0], 120.0 * f64::from(i)),
        })
        .collect();

    let ring = doc.add_array(
        "MagnetRing",
        magnet,
        ArrayMode::Polar,
        Transform::from_position([0.0, 0.0, 10.0]),
        elements.clone(),
    );

    let rotor = doc.add_container("Rotor", Transform::identity());
    doc.add_child(rotor, ring).unwrap();

    let resolver = Resolver::new(&scene);
    let instances = resolver.resolve(&[rotor], stop::never()).unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].node, ring);

    let expanded = resolver.expand_elements(&instances[0]).unwrap();
    assert_eq!(expanded.len(), 3);
    for (v, element) in expanded.iter().zip(elements.iter()) {
        assert_eq!(v.index, element.index);
        assert_relative_eq!(
            v.world_placement,
            instances[0].world_placement * element.placement,
            epsilon = 1e-12
        );
    }

    let leaf = resolver.resolve(&[magnet], stop::never()).unwrap();
    assert!(resolver.expand_elements(&leaf[0]).unwrap().is_empty());
}

#[test]
fn cycles_are_reported() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let frame = doc.add_container("Frame", Transform::identity());
    let back = doc.add_link("Back", frame, Transform::identity(), true);
    doc.add_child(frame, back).unwrap();

    let result = Resolver::new(&scene).resolve(&[frame], stop::never());
    assert!(matches!(result, Err(Error::CyclicReference(v)) if v == frame));
}

#[test]
fn dangling_references_are_reported() {
    let mut scene = DocumentSet::new();
    let id = scene.add_document("Turbine").unwrap();
    let doc = scene.document_mut(id).unwrap();

    let ghost = NodeRef::new(DocumentId::new(7), NodeIndex::new(0));
    let link = doc.add_link("Ghost", ghost, Transform::identity(), true);

    let result = Resolver::new(&scene).resolve(&[link], stop::never());
    assert!(matches!(result, Err(Error::DanglingReference(v)) if v == ghost));
}
